//! Background sound effect.
//!
//! Playback is delegated to whatever command-line player the platform has;
//! the player runs as a child process so the animation never waits on it.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

pub const DEFAULT_CANDIDATES: [&str; 4] = ["audio.mp3", "audio.wav", "sound.mp3", "sound.wav"];

/// A command-line player and the flags that keep it quiet and windowless.
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

#[cfg(target_os = "macos")]
pub const PLAYERS: &[Player] = &[Player {
    program: "afplay",
    args: &[],
}];

#[cfg(windows)]
pub const PLAYERS: &[Player] = &[Player {
    program: "cmd",
    args: &["/C", "start", ""],
}];

#[cfg(not(any(target_os = "macos", windows)))]
pub const PLAYERS: &[Player] = &[
    Player {
        program: "mpv",
        args: &["--no-video", "--really-quiet"],
    },
    Player {
        program: "mplayer",
        args: &["-really-quiet"],
    },
    Player {
        program: "ffplay",
        args: &["-nodisp", "-autoexit", "-loglevel", "quiet"],
    },
    Player {
        program: "play-audio",
        args: &[],
    },
];

/// What happened when we tried to start the sound; shown to the user.
#[derive(Debug)]
pub enum AudioNotice {
    Playing { file: PathBuf, player: &'static str },
    NoPlayer,
    NoFile { looked_for: Vec<PathBuf> },
    Failed(io::Error),
}

impl AudioNotice {
    pub fn is_playing(&self) -> bool {
        matches!(self, AudioNotice::Playing { .. })
    }
}

impl fmt::Display for AudioNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioNotice::Playing { file, player } => {
                write!(f, "AUDIO: Playing {} with {}", file.display(), player)
            }
            AudioNotice::NoPlayer => f.write_str("AUDIO: No suitable audio player found"),
            AudioNotice::NoFile { looked_for } => {
                let names: Vec<String> = looked_for
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect();
                write!(
                    f,
                    "AUDIO: No audio file found. Looking for: {}",
                    names.join(", ")
                )
            }
            AudioNotice::Failed(e) => write!(f, "AUDIO: System command error: {e}"),
        }
    }
}

/// A running player. Dropping it stops playback.
#[derive(Debug)]
pub struct Playback {
    child: Child,
    player: &'static str,
}

impl Playback {
    pub fn player(&self) -> &'static str {
        self.player
    }

    pub fn stop(&mut self) {
        match self.child.try_wait() {
            Ok(Some(_)) => {}
            _ => {
                let _ = self.child.kill();
                let _ = self.child.wait();
                tracing::debug!(player = self.player, "audio stopped");
            }
        }
    }
}

impl Drop for Playback {
    fn drop(&mut self) {
        self.stop();
    }
}

/// First candidate that exists, resolving relative paths against `dir`.
pub fn locate(dir: &Path, candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|c| if c.is_absolute() { c.clone() } else { dir.join(c) })
        .find(|p| p.is_file())
}

pub fn default_candidates() -> Vec<PathBuf> {
    DEFAULT_CANDIDATES.iter().map(PathBuf::from).collect()
}

/// Spawn the first installed player from `players` on `file`.
pub fn spawn_with(players: &[Player], file: &Path) -> Result<Option<Playback>, io::Error> {
    for player in players {
        let spawned = Command::new(player.program)
            .args(player.args)
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => {
                tracing::debug!(player = player.program, file = %file.display(), "audio started");
                return Ok(Some(Playback {
                    child,
                    player: player.program,
                }));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(player = player.program, "audio player not installed");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}

/// Find a sound file and start playing it.
pub fn start(dir: &Path, candidates: &[PathBuf]) -> (Option<Playback>, AudioNotice) {
    let Some(file) = locate(dir, candidates) else {
        return (
            None,
            AudioNotice::NoFile {
                looked_for: candidates.to_vec(),
            },
        );
    };

    match spawn_with(PLAYERS, &file) {
        Ok(Some(playback)) => {
            let notice = AudioNotice::Playing {
                file: file
                    .strip_prefix(dir)
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| file.clone()),
                player: playback.player(),
            };
            (Some(playback), notice)
        }
        Ok(None) => (None, AudioNotice::NoPlayer),
        Err(e) => {
            tracing::warn!(error = %e, "failed to start audio player");
            (None, AudioNotice::Failed(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_takes_first_existing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sound.mp3"), b"x").unwrap();
        std::fs::write(dir.path().join("sound.wav"), b"x").unwrap();

        let found = locate(dir.path(), &default_candidates()).unwrap();
        assert_eq!(found, dir.path().join("sound.mp3"));
    }

    #[test]
    fn locate_ignores_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("audio.mp3")).unwrap();
        assert_eq!(locate(dir.path(), &default_candidates()), None);
    }

    #[test]
    fn missing_file_lists_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let (playback, notice) = start(dir.path(), &default_candidates());
        assert!(playback.is_none());
        assert_eq!(
            notice.to_string(),
            "AUDIO: No audio file found. Looking for: audio.mp3, audio.wav, sound.mp3, sound.wav"
        );
    }

    #[test]
    fn uninstalled_players_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("audio.wav");
        std::fs::write(&file, b"x").unwrap();

        let players = [Player {
            program: "nullalarm-test-no-such-player",
            args: &[],
        }];
        assert!(spawn_with(&players, &file).unwrap().is_none());
    }

    #[test]
    fn playing_notice_names_file_and_player() {
        let notice = AudioNotice::Playing {
            file: PathBuf::from("audio.mp3"),
            player: "mpv",
        };
        assert!(notice.is_playing());
        assert_eq!(notice.to_string(), "AUDIO: Playing audio.mp3 with mpv");
    }
}
