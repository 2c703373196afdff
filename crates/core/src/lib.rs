pub mod game;
pub mod graph;
pub mod journal;
pub mod journal_file;
pub mod map;
pub mod replay;
pub mod scenario;
pub mod state;
pub mod types;

pub use game::{Game, enumerate_simple_paths, shortest_route, valid_routes};
pub use graph::{Graph, Node};
pub use journal::{JournalHeader, TurnJournal, TurnRecord};
pub use map::{MapDescription, MapError, build_graph, load_map};
pub use replay::*;
pub use scenario::Scenario;
pub use state::GameState;
pub use types::*;
