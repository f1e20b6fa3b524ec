//! Rule resolution engine.
//!
//! Scopes are discovered by the [`crawler`], each loaded by the [`loader`] into
//! ranked [`rule::CompiledRule`]s, evaluated concurrently by the [`matcher`],
//! and the matches expanded by [`template`]. The winning command is run by a
//! [`dispatch::Dispatcher`].

pub mod crawler;
pub mod dispatch;
pub mod error;
pub mod loader;
pub mod matcher;
pub mod resolve;
pub mod rule;
pub mod template;

pub use crawler::{ConfigTree, crawl};
pub use dispatch::{Dispatcher, SpawnDispatcher, platform_dispatcher};
pub use error::{ApporteError, Diagnostics, DispatchError, LoadError, MatchError, RuleError};
pub use loader::load_scope;
pub use matcher::{MatchEngine, match_all};
pub use resolve::{Resolution, Resolver, resolve};
pub use rule::{CompiledRule, RawRule, RuleOutput};
pub use template::expand;
