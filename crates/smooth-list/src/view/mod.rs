//! The live side of the list: surfaces, changeset replay and the
//! controller.
//!
//! A [`ListSurface`] is the recycling list widget being driven. The
//! [`ListController`] owns one, keeps its [`Arrangement`] in step with the
//! latest snapshot through [`apply`], and provisions recycled
//! [`HostedView`]s for the cells the surface asks for.
//!
//! [`HeadlessList`] is an in-memory surface that enforces batch-update
//! consistency and simulates a scrolling viewport.

mod applier;
mod arrangement;
mod controller;
pub mod headless;
mod pool;
mod surface;
mod swipe;

pub use applier::{ApplyOutcome, ConsistencyPolicy, apply};
pub use arrangement::Arrangement;
pub use controller::{
    CellContent, ContentProviders, ControllerState, ListController, ListSignals, RefreshMode,
    RowDeletion, SupplementaryContent,
};
pub use headless::{HeadlessList, SurfaceCall};
pub use pool::{HostedView, ReuseIdentifier, ReusePool};
pub use surface::{CellRequest, DataSource, ListSurface, RowKey, SectionKey};
pub use swipe::{
    BehaviorBindings, SwipeAction, SwipeActionKind, SwipeActionProvider, SwipeActionStyle,
    SwipeActionsConfiguration, SwipeEdge, SwipeHandler,
};
