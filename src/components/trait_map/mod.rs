pub mod colormap;
mod component;
mod controls;
pub mod ellipse;
pub mod load;
pub mod pick;
pub mod radar;
pub mod render;
pub mod scale;
pub mod scene;
pub mod schema;
pub mod state;
pub mod traits;
pub mod types;

pub use component::{RadarChart, TraitMapCanvas};
pub use controls::{NodeLookup, TraitDefinitions, ViewControls, edit};
pub use load::{DataSource, spawn_load};
pub use state::{LoadState, ViewState};
pub use types::{GraphData, GraphLink, GraphNode};
