use indexmap::IndexMap;

use super::{Dependency, DependencyId, DependencyKind, ModuleIdentifier, NormalModule};
use crate::diagnostics::SourceLocation;

/// Modules and the edges between them, in order of first discovery.
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    modules: IndexMap<ModuleIdentifier, NormalModule>,
    dependencies: Vec<Dependency>,
    /// Resolved target per dependency, indexed like `dependencies`.
    targets: Vec<Option<ModuleIdentifier>>,
    /// Incoming edges per module, in edge creation order.
    incoming: IndexMap<ModuleIdentifier, Vec<DependencyId>>,
}

impl ModuleGraph {
    pub fn add_dependency(
        &mut self,
        kind: DependencyKind,
        request: impl Into<String>,
        origin: Option<ModuleIdentifier>,
        location: Option<SourceLocation>,
        span: Option<(usize, usize)>,
    ) -> DependencyId {
        let id = DependencyId(self.dependencies.len());
        self.dependencies.push(Dependency {
            id,
            kind,
            request: request.into(),
            origin,
            location,
            span,
        });
        self.targets.push(None);
        id
    }

    pub fn set_resolved(&mut self, dependency: DependencyId, target: ModuleIdentifier) {
        self.targets[dependency.0] = Some(target.clone());
        self.incoming.entry(target).or_default().push(dependency);
    }

    pub fn add_module(&mut self, module: NormalModule) {
        self.modules.entry(module.identifier.clone()).or_insert(module);
    }

    pub fn contains(&self, identifier: &ModuleIdentifier) -> bool {
        self.modules.contains_key(identifier)
    }

    pub fn module(&self, identifier: &ModuleIdentifier) -> Option<&NormalModule> {
        self.modules.get(identifier)
    }

    pub fn modules(&self) -> impl Iterator<Item = &NormalModule> {
        self.modules.values()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn dependency(&self, id: DependencyId) -> &Dependency {
        &self.dependencies[id.0]
    }

    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn target(&self, id: DependencyId) -> Option<&ModuleIdentifier> {
        self.targets.get(id.0).and_then(Option::as_ref)
    }

    /// Edges pointing at `identifier`, oldest first.
    pub fn incoming(&self, identifier: &ModuleIdentifier) -> &[DependencyId] {
        self.incoming
            .get(identifier)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolved outgoing edges of a module as `(dependency, target)` pairs.
    pub fn outgoing(
        &self,
        identifier: &ModuleIdentifier,
    ) -> impl Iterator<Item = (&Dependency, &ModuleIdentifier)> {
        self.modules
            .get(identifier)
            .into_iter()
            .flat_map(|module| module.dependencies.iter())
            .filter_map(|id| Some((self.dependency(*id), self.target(*id)?)))
    }

    /// Modules from an entry down to `identifier`, following each module's
    /// first incoming edge. Empty for modules reached directly from an entry.
    pub fn issuer_path(&self, identifier: &ModuleIdentifier) -> Vec<ModuleIdentifier> {
        let mut path = Vec::new();
        let mut current = identifier.clone();
        loop {
            let Some(first) = self.incoming(&current).first() else {
                break;
            };
            let Some(origin) = self.dependency(*first).origin.clone() else {
                break;
            };
            if origin == *identifier || path.contains(&origin) {
                break;
            }
            path.push(origin.clone());
            current = origin;
        }
        path.reverse();
        path
    }
}
