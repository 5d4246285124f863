use cascade::{
    CascadeConfig, Component, Dom, Endpoint, MemoryDom, OptionRecord, OptionSource,
    PopulateError, ParentId, SelectElement, SelectOption,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use tokio::sync::oneshot;

pub fn rec(id: &str, name: &str) -> OptionRecord {
    OptionRecord::new(id, name)
}

/// Option source answering from a fixed table keyed by parent id.
#[derive(Default)]
pub struct FakeSource {
    responses: Mutex<HashMap<String, Vec<OptionRecord>>>,
    queued: Mutex<HashMap<String, VecDeque<Vec<OptionRecord>>>>,
    failures: Mutex<HashSet<String>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, parent: &str, records: Vec<OptionRecord>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(parent.to_string(), records);
        self
    }

    /// One answer per call for `parent`, in call order, before falling back
    /// to the fixed table.
    pub fn respond_in_turn(self, parent: &str, answers: Vec<Vec<OptionRecord>>) -> Self {
        self.queued
            .lock()
            .unwrap()
            .insert(parent.to_string(), answers.into());
        self
    }

    pub fn fail(self, parent: &str) -> Self {
        self.failures.lock().unwrap().insert(parent.to_string());
        self
    }

    /// Holds the response for `parent` until the returned sender fires.
    pub fn gate(&self, parent: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(parent.to_string(), rx);
        tx
    }

    /// `(path, "param=value")` per fetch, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl OptionSource for FakeSource {
    async fn fetch(
        &self,
        endpoint: &Endpoint,
        parent: &ParentId,
    ) -> Result<Vec<OptionRecord>, PopulateError> {
        {
            self.calls.lock().unwrap().push((
                endpoint.path.clone(),
                format!("{}={}", endpoint.query_param, parent),
            ));
        }

        let queued = {
            self.queued
                .lock()
                .unwrap()
                .get_mut(parent.as_str())
                .and_then(VecDeque::pop_front)
        };

        let gate = { self.gates.lock().unwrap().remove(parent.as_str()) };
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.failures.lock().unwrap().contains(parent.as_str()) {
            return Err(PopulateError::Status {
                url: endpoint.path.clone(),
                status: 500,
            });
        }

        if let Some(records) = queued {
            return Ok(records);
        }

        let records = self
            .responses
            .lock()
            .unwrap()
            .get(parent.as_str())
            .cloned()
            .unwrap_or_default();
        Ok(records)
    }
}

/// Department and designation controls holding only a placeholder.
pub fn form_dom() -> MemoryDom {
    let config = CascadeConfig::default();
    MemoryDom::new()
        .with_control(
            SelectElement::new(config.endpoint(Component::Department).control_id.as_str())
                .with_options(vec![SelectOption::placeholder()]),
        )
        .with_control(
            SelectElement::new(config.endpoint(Component::Designation).control_id.as_str())
                .with_options(vec![SelectOption::placeholder()]),
        )
}

/// `(value, label, selected)` triples of a control, for compact assertions.
pub fn snapshot(dom: &MemoryDom, control_id: &str) -> Vec<(String, String, bool)> {
    dom.control(control_id)
        .expect("control exists")
        .options()
        .iter()
        .map(|o| (o.value.clone(), o.label.clone(), o.selected))
        .collect()
}

pub fn selected_value(dom: &MemoryDom, control_id: &str) -> Option<String> {
    dom.selected_value(control_id).unwrap()
}
