//! Named action templates.

use rustc_hash::FxHashMap;

use crate::{
    Action, ActionError, ActionId, ActionInfo, ActionResult, CollectResource,
    CollectResourceParams, DirectedAttack, DirectedAttackParams, MoveToPoint, MoveToPointParams,
    MoveToTarget, MoveToTargetParams, Patrol, PatrolParams,
};

/// Insertion-ordered set of action templates addressed by [`ActionId`].
///
/// Templates are never run.  Agents receive instances via
/// [`instantiate`][Self::instantiate] / [`instantiate_all`][Self::instantiate_all].
#[derive(Debug, Default)]
pub struct ActionLibrary {
    templates: Vec<Box<dyn Action>>,
    by_name:   FxHashMap<ActionId, usize>,
}

impl ActionLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move (smart), follow, patrol, attack (smart) and collect (smart) with
    /// default parameters.  Building needs prefab names and is added by the
    /// caller or a catalog.
    pub fn standard() -> Self {
        let mut lib = Self::new();
        let templates: [Box<dyn Action>; 5] = [
            Box::new(MoveToPoint::new(
                ActionInfo::new("move").with_icon("move").with_description("Move to a point").smart(true),
                MoveToPointParams::default(),
            )),
            Box::new(MoveToTarget::new(
                ActionInfo::new("follow").with_icon("follow").with_description("Follow a unit"),
                MoveToTargetParams::default(),
            )),
            Box::new(Patrol::new(
                ActionInfo::new("patrol").with_icon("patrol").with_description("Patrol between two points"),
                PatrolParams::default(),
            )),
            Box::new(DirectedAttack::new(
                ActionInfo::new("attack").with_icon("attack").with_description("Attack an enemy").smart(true),
                DirectedAttackParams::default(),
            )),
            Box::new(CollectResource::new(
                ActionInfo::new("collect").with_icon("collect").with_description("Gather resources").smart(true),
                CollectResourceParams::default(),
            )),
        ];
        for template in templates {
            lib.push(template);
        }
        lib
    }

    /// Add a template.  Names must be unique.
    pub fn register(&mut self, template: Box<dyn Action>) -> ActionResult<()> {
        if self.by_name.contains_key(template.id().as_str()) {
            return Err(ActionError::DuplicateAction(template.id().to_string()));
        }
        self.push(template);
        Ok(())
    }

    /// Builder-style [`register`][Self::register].
    pub fn with(mut self, template: impl Action + 'static) -> ActionResult<Self> {
        self.register(Box::new(template))?;
        Ok(self)
    }

    fn push(&mut self, template: Box<dyn Action>) {
        self.by_name.insert(template.id().clone(), self.templates.len());
        self.templates.push(template);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Action> {
        self.by_name.get(name).map(|&i| self.templates[i].as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// A fresh instance of the named template.
    pub fn instantiate(&self, name: &str) -> ActionResult<Box<dyn Action>> {
        self.get(name)
            .map(|t| t.instantiate())
            .ok_or_else(|| ActionError::UnknownAction(name.to_owned()))
    }

    /// One fresh instance of every template, in registration order.
    pub fn instantiate_all(&self) -> Vec<Box<dyn Action>> {
        self.templates.iter().map(|t| t.instantiate()).collect()
    }

    /// Fresh instances of the named templates, in the given order.
    pub fn instantiate_named(&self, names: &[&str]) -> ActionResult<Vec<Box<dyn Action>>> {
        names.iter().map(|name| self.instantiate(name)).collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ActionId> + '_ {
        self.templates.iter().map(|t| t.id())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Action> + '_ {
        self.templates.iter().map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
