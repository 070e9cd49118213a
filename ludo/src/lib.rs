pub use dice::*;
pub use errors::*;
pub use game::*;
pub use history::*;
pub use path::*;
pub use protocol_types::*;
pub use rules::*;
pub use save::*;
pub use state::*;
pub use token::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod dice;
mod errors;
mod game;
mod history;
mod path;
mod protocol_types;
mod rules;
mod save;
mod state;
mod token;
mod visualization;
