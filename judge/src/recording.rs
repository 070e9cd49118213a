use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use ludo::Request;
use serde::{Deserialize, Serialize};

/// Writes the requests and responses of each game into a directory, one
/// JSON file per game.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    requests: Vec<RequestToPlayer>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            requests: Vec::new(),
        })
    }

    pub fn store_request(
        &mut self,
        player: &str,
        request: &Request,
        response: serde_json::Value,
    ) -> anyhow::Result<()> {
        self.requests.push(RequestToPlayer {
            player: String::from(player),
            request: serde_json::to_value(request)?,
            response,
        });
        Ok(())
    }

    /// Writes out everything stored since the last call, and returns the
    /// path of the new file.
    pub fn write_game_recording(&mut self) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        let recording = GameRecording {
            requests: std::mem::take(&mut self.requests),
        };
        serde_json::to_writer_pretty(&mut writer, &recording)?;
        writer.flush()?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Serialize, Deserialize)]
pub struct GameRecording {
    pub requests: Vec<RequestToPlayer>,
}

#[derive(Serialize, Deserialize)]
pub struct RequestToPlayer {
    pub player: String,
    pub request: serde_json::Value,
    pub response: serde_json::Value,
}
