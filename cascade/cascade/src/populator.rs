use crate::cache::OptionsCache;
use crate::control::{Dom, SelectOption, build_options, render_options, reselect};
use crate::error::PopulateError;
use crate::record::{OptionRecord, ParentId};
use crate::source::{Endpoint, OptionSource};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    /// Organization -> departments.
    Department,
    /// Department -> designations.
    Designation,
}

impl Component {
    pub fn operation(&self) -> &'static str {
        match self {
            Component::Department => "get_department_for_organization",
            Component::Designation => "get_designation_for_department",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Department => f.write_str("department"),
            Component::Designation => f.write_str("designation"),
        }
    }
}

/// What a populator fetches and which control it rewrites.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub component: Component,
    pub endpoint: Endpoint,
    pub control_id: String,
}

/// Request sequence number, unique and increasing per populator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied(Applied),
    /// A newer request was issued before this one completed; the control was
    /// left alone.
    Superseded {
        ticket: Ticket,
        parent: ParentId,
        latest: Ticket,
    },
}

impl Outcome {
    pub fn applied(&self) -> Option<&Applied> {
        match self {
            Outcome::Applied(applied) => Some(applied),
            Outcome::Superseded { .. } => None,
        }
    }

    pub fn ticket(&self) -> Ticket {
        match self {
            Outcome::Applied(applied) => applied.ticket,
            Outcome::Superseded { ticket, .. } => *ticket,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    pub ticket: Ticket,
    pub parent: ParentId,
    /// Final option list, selection restored.
    pub options: Vec<SelectOption>,
    /// Prior value that was found in the new list and re-selected.
    pub reselected: Option<String>,
    /// Inserted markup: the freshly built list before the prior selection
    /// was restored, so the placeholder is the selected entry. Equals
    /// `OptionsCache::rendered` for this parent.
    pub markup: String,
}

/// Fills one select control from the options of the chosen parent.
pub struct Populator<S, D> {
    target: Target,
    source: Arc<S>,
    dom: Arc<D>,
    cache: OptionsCache,
    latest: AtomicU64,
    apply_lock: Mutex<()>,
}

impl<S, D> Populator<S, D>
where
    S: OptionSource,
    D: Dom,
{
    pub fn new(target: Target, source: Arc<S>, dom: Arc<D>) -> Self {
        Self {
            target,
            source,
            dom,
            cache: OptionsCache::new(),
            latest: AtomicU64::new(0),
            apply_lock: Mutex::new(()),
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn cache(&self) -> &OptionsCache {
        &self.cache
    }

    pub fn latest_ticket(&self) -> Ticket {
        Ticket(self.latest.load(Ordering::SeqCst))
    }

    /// Fetches the options for `parent` and swaps them into the control.
    ///
    /// The cache is written only once the control has been repopulated; a
    /// failed or superseded request leaves both the control and the cache as
    /// they were.
    pub async fn populate(&self, parent: impl Into<ParentId>) -> Result<Outcome, PopulateError> {
        let parent = parent.into();
        let ticket = self.issue(&parent);
        self.complete(ticket, parent).await
    }

    /// Issues the ticket immediately and runs the fetch on the runtime, the
    /// way a change handler fires a request and returns.
    pub fn spawn(
        self: &Arc<Self>,
        parent: impl Into<ParentId>,
    ) -> JoinHandle<Result<Outcome, PopulateError>>
    where
        S: 'static,
        D: 'static,
    {
        let parent = parent.into();
        let ticket = self.issue(&parent);
        let this = Arc::clone(self);
        tokio::spawn(async move { this.complete(ticket, parent).await })
    }

    fn issue(&self, parent: &ParentId) -> Ticket {
        let ticket = Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
        tracing::debug!(
            "{} request {} issued: {}={}",
            self.target.component,
            ticket,
            self.target.endpoint.query_param,
            parent
        );
        ticket
    }

    async fn complete(&self, ticket: Ticket, parent: ParentId) -> Result<Outcome, PopulateError> {
        let records = match self.source.fetch(&self.target.endpoint, &parent).await {
            Ok(records) => records,
            Err(err) => return Err(self.failed(ticket, &parent, err)),
        };

        let _guard = self.apply_lock.lock().await;
        let latest = self.latest_ticket();
        if ticket != latest {
            tracing::debug!(
                "{} request {} for '{}' superseded by {}",
                self.target.component,
                ticket,
                parent,
                latest
            );
            return Ok(Outcome::Superseded {
                ticket,
                parent,
                latest,
            });
        }

        let applied = match self.apply(ticket, &parent, &records) {
            Ok(applied) => applied,
            Err(err) => return Err(self.failed(ticket, &parent, err)),
        };
        self.cache.store(parent, records);

        tracing::info!(
            "{} '#{}' repopulated for '{}' with {} options",
            self.target.component,
            self.target.control_id,
            applied.parent,
            applied.options.len() - 1
        );

        Ok(Outcome::Applied(applied))
    }

    /// Swaps the freshly built list into the control. Runs under the apply lock.
    fn apply(
        &self,
        ticket: Ticket,
        parent: &ParentId,
        records: &[OptionRecord],
    ) -> Result<Applied, PopulateError> {
        let control_id = self.target.control_id.as_str();
        let prior = self.dom.selected_value(control_id)?;

        let mut options = build_options(records);
        let markup = render_options(&options);
        let reselected = reselect(&mut options, prior.as_deref());
        self.dom.replace_options(control_id, options.clone())?;

        Ok(Applied {
            ticket,
            parent: parent.clone(),
            options,
            reselected,
            markup,
        })
    }

    fn failed(&self, ticket: Ticket, parent: &ParentId, err: PopulateError) -> PopulateError {
        tracing::warn!(
            "{} request {} for '{}' failed: {}",
            self.target.component,
            ticket,
            parent,
            err
        );
        err
    }
}
