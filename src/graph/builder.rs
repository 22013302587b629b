use miette::Result;

use super::resolver::{DependencyResolver, ExactResolver};
use super::types::{BuildCounters, DependencyGraph};
use crate::core::{BuildUnit, DependencyDeclaration};
use crate::error::DependencyMapperError;

/// Builder for constructing dependency graphs
///
/// Every unit becomes a node, including units that declare nothing. Each
/// non-blank declaration becomes an edge from its owner to the unit the
/// resolver picks, or to an external marker named after the raw string.
pub struct DependencyGraphBuilder {
    resolver: Box<dyn DependencyResolver>,
}

impl Default for DependencyGraphBuilder {
    fn default() -> Self {
        Self::new(Box::new(ExactResolver))
    }
}

impl DependencyGraphBuilder {
    pub fn new(resolver: Box<dyn DependencyResolver>) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &dyn DependencyResolver {
        self.resolver.as_ref()
    }

    /// Build a fresh graph from the discovered units and their declarations
    ///
    /// Calling this twice with the same inputs yields graphs with equal node
    /// and edge sets.
    pub fn build(
        &self,
        units: &[BuildUnit],
        declarations: &[DependencyDeclaration],
    ) -> Result<DependencyGraph> {
        let mut graph = DependencyGraph::new();
        let mut counters = BuildCounters::default();

        let mut sorted: Vec<&BuildUnit> = units.iter().collect();
        sorted.sort();
        for unit in sorted {
            graph.add_unit(unit);
        }

        for declaration in declarations {
            if declaration.is_blank() {
                counters.blank += 1;
                continue;
            }

            let from = graph.unit_index(&declaration.owner).ok_or_else(|| {
                DependencyMapperError::GraphError {
                    message: format!(
                        "Declaration '{}' belongs to '{}', which is not a discovered build unit",
                        declaration.dependency, declaration.owner
                    ),
                }
            })?;

            let to = match self.resolver.resolve(&declaration.dependency, units) {
                Some(unit) => graph.add_unit(unit),
                None => {
                    counters.unresolved += 1;
                    graph.add_external(&declaration.dependency)
                }
            };

            if !graph.add_dependency(from, to, &declaration.dependency) {
                counters.duplicate += 1;
            }
        }

        graph.set_counters(counters);
        Ok(graph)
    }
}
