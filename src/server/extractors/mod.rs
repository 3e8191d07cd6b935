mod episode_query_extractor;
mod path_id_extractor;

pub use episode_query_extractor::*;
pub use path_id_extractor::*;
