use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use ludo::Request;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::recording::Recorder;

/// How to start a bot, as read from its JSON config file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub nick: String,
    /// The executable, followed by its arguments.
    pub cmd: Vec<String>,
    /// The color to draw this player in. Defaults to the seat's color.
    #[serde(default)]
    pub color: Option<String>,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: PlayerConfig = serde_json::from_reader(BufReader::new(file))?;
        if config.cmd.is_empty() {
            anyhow::bail!("Player config '{}' has an empty cmd", path.display());
        }
        Ok(config)
    }
}

/// A running bot process.
pub struct Player {
    pub name: String,
    /// Position of this player's config on the command line.
    pub config_idx: usize,
    pub color: Option<String>,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

impl Player {
    pub fn from_config(config: &PlayerConfig, config_idx: usize) -> anyhow::Result<Self> {
        let Some((program, args)) = config.cmd.split_first() else {
            anyhow::bail!("No command given for player '{}'", config.nick);
        };
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;
        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            anyhow::bail!("Could not access stdin/stdout of player '{}'", config.nick);
        };

        Ok(Self {
            name: config.nick.clone(),
            config_idx,
            color: config.color.clone(),
            child,
            stdin,
            stdout: BufReader::new(stdout),
            buf: String::new(),
        })
    }

    pub fn perform_request<T: serde::de::DeserializeOwned + std::fmt::Debug>(
        &mut self,
        recorder: &mut Option<Recorder>,
        req: &Request,
    ) -> anyhow::Result<T> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = &self.name, request = %req_json);
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        self.buf.clear();
        self.stdout.read_line(&mut self.buf)?;
        let serialized_response = self.buf.trim_end();
        let response = serde_json::from_str::<T>(serialized_response)?;
        trace!(name: "Received response", player = &self.name, response = %serialized_response);

        if let Some(recorder) = recorder {
            recorder.store_request(&self.name, req, serde_json::from_str(serialized_response)?)?;
        }
        self.buf.clear();
        Ok(response)
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        let bye = serde_json::to_string(&Request::Bye).unwrap_or_default();
        if writeln!(self.stdin, "{}", bye).and_then(|_| self.stdin.flush()).is_err() {
            warn!(player = &self.name, "Could not say bye to player");
        }
        if let Err(err) = self.child.wait() {
            warn!(player = &self.name, %err, "Player process did not exit cleanly");
        }
    }
}
