use crate::config::CascadeConfig;
use crate::control::Dom;
use crate::error::PopulateError;
use crate::populator::{Component, Outcome, Populator};
use crate::record::ParentId;
use crate::source::{HttpOptionSource, OptionSource};
use std::sync::Arc;
use tokio::task::JoinHandle;

type Pending = JoinHandle<Result<Outcome, PopulateError>>;

/// Organization -> department -> designation chain of one admin form.
///
/// Each populator owns its own cache and request sequence; the two share the
/// option source and the DOM.
pub struct ChainedForm<S, D> {
    department: Arc<Populator<S, D>>,
    designation: Arc<Populator<S, D>>,
}

impl<S, D> ChainedForm<S, D>
where
    S: OptionSource + 'static,
    D: Dom + 'static,
{
    pub fn new(config: &CascadeConfig, source: Arc<S>, dom: Arc<D>) -> Self {
        Self {
            department: Arc::new(Populator::new(
                config.target(Component::Department),
                Arc::clone(&source),
                Arc::clone(&dom),
            )),
            designation: Arc::new(Populator::new(
                config.target(Component::Designation),
                source,
                dom,
            )),
        }
    }

    pub fn department(&self) -> &Populator<S, D> {
        &self.department
    }

    pub fn designation(&self) -> &Populator<S, D> {
        &self.designation
    }

    pub fn populator(&self, component: Component) -> &Populator<S, D> {
        match component {
            Component::Department => &self.department,
            Component::Designation => &self.designation,
        }
    }

    pub async fn get_department_for_organization(
        &self,
        organization_id: impl Into<ParentId>,
    ) -> Result<Outcome, PopulateError> {
        self.department.populate(organization_id).await
    }

    pub async fn get_designation_for_department(
        &self,
        department_id: impl Into<ParentId>,
    ) -> Result<Outcome, PopulateError> {
        self.designation.populate(department_id).await
    }

    /// Change handler of the organization field.
    pub fn on_organization_change(&self, organization_id: impl Into<ParentId>) -> Pending {
        self.department.spawn(organization_id)
    }

    /// Change handler of the department field.
    pub fn on_department_change(&self, department_id: impl Into<ParentId>) -> Pending {
        self.designation.spawn(department_id)
    }
}

impl<D> ChainedForm<HttpOptionSource, D>
where
    D: Dom + 'static,
{
    /// Form backed by the helper endpoints named in `config`.
    pub fn connect(config: &CascadeConfig, dom: Arc<D>) -> Result<Self, PopulateError> {
        let source = Arc::new(HttpOptionSource::new(config)?);
        Ok(Self::new(config, source, dom))
    }
}
