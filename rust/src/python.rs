//! PyO3 bindings, built with the `python` feature.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

use crate::calendar::{project_dates, TimeUnit};
use crate::config::{LayoutConfig, NetworkConfig};
use crate::error::Error;
use crate::registry::ScheduleNetwork;
use crate::report::NetworkReport;

fn to_py_err(err: Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn parse_unit(unit: &str) -> PyResult<TimeUnit> {
    match unit {
        "days" => Ok(TimeUnit::Days),
        "weeks" => Ok(TimeUnit::Weeks),
        other => Err(PyValueError::new_err(format!("Unknown time unit: {}", other))),
    }
}

/// A task with its computed times.
#[pyclass(name = "TaskRow")]
#[derive(Clone, Debug)]
pub struct PyTaskRow {
    #[pyo3(get)]
    pub id: u32,
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub duration: f64,
    #[pyo3(get)]
    pub dependencies: Vec<u32>,
    #[pyo3(get)]
    pub earliest_start: f64,
    #[pyo3(get)]
    pub earliest_finish: f64,
    #[pyo3(get)]
    pub latest_start: f64,
    #[pyo3(get)]
    pub latest_finish: f64,
    #[pyo3(get)]
    pub slack: f64,
    #[pyo3(get)]
    pub critical: bool,
}

#[pymethods]
impl PyTaskRow {
    fn __repr__(&self) -> String {
        format!(
            "TaskRow(id={}, name={:?}, ES={}, EF={}, LS={}, LF={}, slack={})",
            self.id,
            self.name,
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish,
            self.slack
        )
    }
}

/// Python handle on an owned precedence network.
#[pyclass(name = "ScheduleNetwork")]
pub struct PyScheduleNetwork {
    inner: ScheduleNetwork,
}

#[pymethods]
impl PyScheduleNetwork {
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<NetworkConfig>) -> Self {
        Self {
            inner: ScheduleNetwork::with_config(config.unwrap_or_default()),
        }
    }

    /// Add a task from form text. Raises ValueError if rejected.
    #[pyo3(signature = (name, duration, dependencies=""))]
    fn add_task(&mut self, name: &str, duration: &str, dependencies: &str) -> PyResult<u32> {
        self.inner
            .add_task_from_text(name, duration, dependencies)
            .map_err(to_py_err)
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn calculate(&mut self) -> PyResult<()> {
        self.inner.calculate().map(|_| ()).map_err(to_py_err)
    }

    /// Replace the network with a random sample.
    #[pyo3(signature = (seed=None))]
    fn generate_random(&mut self, seed: Option<u64>) -> PyResult<()> {
        let result = match seed {
            Some(seed) => self.inner.generate_random(&mut StdRng::seed_from_u64(seed)),
            None => self.inner.generate_random(&mut rand::rng()),
        };
        result.map_err(to_py_err)
    }

    fn tasks(&self) -> Vec<PyTaskRow> {
        let result = self.inner.result();
        self.inner
            .tasks()
            .iter()
            .map(|task| PyTaskRow {
                id: task.id,
                name: task.name.clone(),
                duration: task.duration,
                dependencies: task.dependencies.clone(),
                earliest_start: task.timing.earliest_start,
                earliest_finish: task.timing.earliest_finish,
                latest_start: task.timing.latest_start,
                latest_finish: task.timing.latest_finish,
                slack: task.timing.slack,
                critical: result.is_critical(task.id),
            })
            .collect()
    }

    /// Critical task ids in ascending order.
    fn critical_path(&self) -> Vec<u32> {
        self.inner.result().critical_path.iter().copied().collect()
    }

    fn project_end(&self) -> f64 {
        self.inner.result().project_end
    }

    /// Diagram layout as a dict with `width`, `height`, `nodes` and `edges`.
    #[pyo3(signature = (config=None))]
    fn layout<'py>(
        &self,
        py: Python<'py>,
        config: Option<LayoutConfig>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let layout = self
            .inner
            .layout(&config.unwrap_or_default())
            .map_err(to_py_err)?;

        let nodes = PyDict::new_bound(py);
        for (id, node) in &layout.nodes {
            let entry = PyDict::new_bound(py);
            entry.set_item("name", &node.name)?;
            entry.set_item("x", node.x)?;
            entry.set_item("y", node.y)?;
            entry.set_item("layer", node.layer)?;
            entry.set_item("style", node.style.as_str())?;
            nodes.set_item(*id, entry)?;
        }
        let edges: Vec<(u32, u32)> = layout.edges.iter().map(|e| (e.source, e.target)).collect();

        let out = PyDict::new_bound(py);
        out.set_item("width", layout.width)?;
        out.set_item("height", layout.height)?;
        out.set_item("nodes", nodes)?;
        out.set_item("edges", edges)?;
        Ok(out)
    }

    /// Calendar dates per task id: (ES, EF, LS, LF).
    #[pyo3(signature = (start, unit="weeks"))]
    fn dates(
        &self,
        start: NaiveDate,
        unit: &str,
    ) -> PyResult<HashMap<u32, (NaiveDate, NaiveDate, NaiveDate, NaiveDate)>> {
        let dates = project_dates(self.inner.result(), start, parse_unit(unit)?)
            .map_err(|e| to_py_err(e.into()))?;
        Ok(dates
            .into_iter()
            .map(|(id, d)| {
                (
                    id,
                    (
                        d.earliest_start,
                        d.earliest_finish,
                        d.latest_start,
                        d.latest_finish,
                    ),
                )
            })
            .collect())
    }

    /// Plain-text table and critical path summary.
    #[pyo3(signature = (unit="weeks"))]
    fn report(&self, unit: &str) -> PyResult<String> {
        let unit = parse_unit(unit)?;
        let report =
            NetworkReport::build(&self.inner, &LayoutConfig::default(), unit).map_err(to_py_err)?;
        Ok(report.to_string())
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleNetwork(tasks={}, project_end={})",
            self.inner.len(),
            self.inner.result().project_end
        )
    }
}

/// The precedence_net Python module.
#[pymodule]
fn precedence_net(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<NetworkConfig>()?;
    m.add_class::<LayoutConfig>()?;
    m.add_class::<PyTaskRow>()?;
    m.add_class::<PyScheduleNetwork>()?;
    Ok(())
}
