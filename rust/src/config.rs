//! Configuration types for the network engine.

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Configuration for network calculation.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Clone, Debug)]
pub struct NetworkConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub verbosity: u8,
    /// Largest absolute slack still treated as zero.
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub critical_tolerance: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            critical_tolerance: crate::critical_path::DEFAULT_CRITICAL_TOLERANCE,
        }
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl NetworkConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, critical_tolerance=None))]
    fn new(verbosity: Option<u8>, critical_tolerance: Option<f64>) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            critical_tolerance: critical_tolerance.unwrap_or(defaults.critical_tolerance),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "NetworkConfig(verbosity={}, critical_tolerance={})",
            self.verbosity, self.critical_tolerance
        )
    }
}

/// Geometry used when assigning diagram coordinates.
#[cfg_attr(feature = "python", pyclass)]
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Width of a node box
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub node_width: f64,
    /// Height of a node box
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub node_height: f64,
    /// Horizontal distance between consecutive layers
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub layer_spacing: f64,
    /// Vertical room reserved per node of the widest layer
    #[cfg_attr(feature = "python", pyo3(get, set))]
    pub vertical_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 150.0,
            node_height: 100.0,
            layer_spacing: 250.0,
            vertical_spacing: 150.0,
        }
    }
}

#[cfg(feature = "python")]
#[pymethods]
impl LayoutConfig {
    #[new]
    #[pyo3(signature = (
        node_width=None,
        node_height=None,
        layer_spacing=None,
        vertical_spacing=None
    ))]
    fn new(
        node_width: Option<f64>,
        node_height: Option<f64>,
        layer_spacing: Option<f64>,
        vertical_spacing: Option<f64>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            node_width: node_width.unwrap_or(defaults.node_width),
            node_height: node_height.unwrap_or(defaults.node_height),
            layer_spacing: layer_spacing.unwrap_or(defaults.layer_spacing),
            vertical_spacing: vertical_spacing.unwrap_or(defaults.vertical_spacing),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "LayoutConfig(node={}x{}, layer_spacing={}, vertical_spacing={})",
            self.node_width, self.node_height, self.layer_spacing, self.vertical_spacing
        )
    }
}
