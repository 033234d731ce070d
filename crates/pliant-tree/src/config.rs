//! Layout configuration shared by groups of nodes.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use pliant_common::{LogLevel, default_log};
use pliant_style::ExperimentalFeature;
use serde::{Deserialize, Serialize};

use crate::node::NodeId;
use crate::tree::Tree;

/// Index of a config in the tree's config table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigId(pub usize);

impl ConfigId {
    /// The config every tree is created with.
    pub const DEFAULT: Self = Self(0);
}

/// Receives every diagnostic the engine emits.
pub type Logger = Rc<dyn Fn(Option<NodeId>, LogLevel, &str)>;

/// Produces a replacement for a child shared with another owner.
///
/// Called with `(tree, child, new_owner, child_index)`. Returning `None`
/// falls back to a shallow clone.
pub type CloneNodeFunc = Rc<dyn Fn(&mut Tree, NodeId, NodeId, usize) -> Option<NodeId>>;

/// Serialisable switches of a [`Config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSettings {
    /// New and reset nodes start from row direction and stretched lines.
    pub use_web_defaults: bool,
    /// Skip content-based main sizing the way early releases did.
    pub use_legacy_stretch_behaviour: bool,
    /// Re-run layout without the legacy flag and record whether it mattered.
    pub should_diff_layout_without_legacy_stretch_behaviour: bool,
    /// Log the laid-out tree at debug level after every pass.
    pub print_tree: bool,
    /// Physical pixels per point; zero disables rounding.
    pub point_scale_factor: f32,
    /// Enabled experimental behaviours.
    pub experimental_features: Vec<ExperimentalFeature>,
}

impl Default for ConfigSettings {
    fn default() -> Self {
        Self {
            use_web_defaults: false,
            use_legacy_stretch_behaviour: false,
            should_diff_layout_without_legacy_stretch_behaviour: false,
            print_tree: false,
            point_scale_factor: 1.0,
            experimental_features: Vec::new(),
        }
    }
}

impl ConfigSettings {
    /// Whether `feature` is switched on.
    #[must_use]
    pub fn is_experimental_feature_enabled(&self, feature: ExperimentalFeature) -> bool {
        self.experimental_features.contains(&feature)
    }

    /// Switch `feature` on or off.
    pub fn set_experimental_feature_enabled(
        &mut self,
        feature: ExperimentalFeature,
        enabled: bool,
    ) {
        let present = self.is_experimental_feature_enabled(feature);
        if enabled && !present {
            self.experimental_features.push(feature);
        } else if !enabled && present {
            self.experimental_features.retain(|&f| f != feature);
        }
    }
}

/// Settings plus the pluggable callbacks.
#[derive(Clone)]
pub struct Config {
    /// Plain switches.
    pub settings: ConfigSettings,
    logger: Logger,
    clone_node: Option<CloneNodeFunc>,
    context: Option<Rc<dyn Any>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(ConfigSettings::default())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("settings", &self.settings)
            .field("has_clone_node", &self.clone_node.is_some())
            .field("has_context", &self.context.is_some())
            .finish_non_exhaustive()
    }
}

impl Config {
    /// A config with `settings` and the default stderr logger.
    #[must_use]
    pub fn new(settings: ConfigSettings) -> Self {
        Self {
            settings,
            logger: Rc::new(|_, level, message| default_log(level, message)),
            clone_node: None,
            context: None,
        }
    }

    /// Forward one message to the logger.
    pub fn log(&self, node: Option<NodeId>, level: LogLevel, message: &str) {
        (self.logger)(node, level, message);
    }

    /// Replace the logger. `None` restores the default stderr sink.
    pub fn set_logger(&mut self, logger: Option<Logger>) {
        self.logger =
            logger.unwrap_or_else(|| Rc::new(|_, level, message| default_log(level, message)));
    }

    /// The clone callback, if one is installed.
    #[must_use]
    pub fn clone_node_func(&self) -> Option<CloneNodeFunc> {
        self.clone_node.clone()
    }

    /// Install or clear the clone callback.
    pub fn set_clone_node_func(&mut self, func: Option<CloneNodeFunc>) {
        self.clone_node = func;
    }

    /// Caller data attached to the config.
    #[must_use]
    pub fn context(&self) -> Option<Rc<dyn Any>> {
        self.context.clone()
    }

    /// Attach or clear caller data.
    pub fn set_context(&mut self, context: Option<Rc<dyn Any>>) {
        self.context = context;
    }

    /// Physical pixels per point; zero disables rounding.
    #[must_use]
    pub const fn point_scale_factor(&self) -> f32 {
        self.settings.point_scale_factor
    }

    /// Shorthand for
    /// [`ConfigSettings::is_experimental_feature_enabled`].
    #[must_use]
    pub fn is_experimental_feature_enabled(&self, feature: ExperimentalFeature) -> bool {
        self.settings.is_experimental_feature_enabled(feature)
    }
}
