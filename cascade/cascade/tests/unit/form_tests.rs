use crate::support::{FakeSource, form_dom, rec, snapshot};
use cascade::{CascadeConfig, ChainedForm, Component, MemoryDom, Outcome, ParentId};
use std::sync::Arc;

type Fixture = (
    ChainedForm<FakeSource, MemoryDom>,
    Arc<MemoryDom>,
    Arc<FakeSource>,
);

fn form(source: FakeSource) -> Fixture {
    let source = Arc::new(source);
    let dom = Arc::new(form_dom());
    let form = ChainedForm::new(
        &CascadeConfig::default(),
        Arc::clone(&source),
        Arc::clone(&dom),
    );
    (form, dom, source)
}

#[tokio::test]
async fn test_department_for_organization() {
    let (form, dom, source) = form(FakeSource::new().respond("5", vec![rec("1", "HR")]));

    form.get_department_for_organization(5u64).await.unwrap();

    assert_eq!(snapshot(&dom, "id_department").len(), 2);
    assert_eq!(snapshot(&dom, "id_designation").len(), 1);
    assert_eq!(
        source.calls(),
        vec![(
            "/helper/get_department_for_organization/".to_string(),
            "organization_id=5".to_string()
        )]
    );
}

#[tokio::test]
async fn test_designation_for_department() {
    let (form, dom, source) = form(
        FakeSource::new().respond("1", vec![rec("4", "Clerk"), rec("5", "Officer")]),
    );

    form.get_designation_for_department("1").await.unwrap();

    assert_eq!(snapshot(&dom, "id_designation").len(), 3);
    assert_eq!(snapshot(&dom, "id_department").len(), 1);
    assert_eq!(
        source.calls(),
        vec![(
            "/helper/get_designation_for_department/".to_string(),
            "department_id=1".to_string()
        )]
    );
}

#[tokio::test]
async fn test_components_keep_separate_state() {
    let (form, _dom, _source) = form(
        FakeSource::new()
            .respond("1", vec![rec("1", "HR")])
            .respond("2", vec![rec("9", "Clerk")]),
    );

    form.get_department_for_organization("1").await.unwrap();
    form.get_department_for_organization("1").await.unwrap();
    form.get_designation_for_department("2").await.unwrap();

    let department = form.populator(Component::Department);
    let designation = form.populator(Component::Designation);
    assert_eq!(department.latest_ticket().0, 2);
    assert_eq!(designation.latest_ticket().0, 1);
    assert_eq!(department.cache().parents(), vec![ParentId::from("1")]);
    assert_eq!(designation.cache().parents(), vec![ParentId::from("2")]);
    assert_eq!(form.department().target().control_id, "id_department");
    assert_eq!(form.designation().target().control_id, "id_designation");
}

#[tokio::test]
async fn test_change_handlers_apply_latest_request() {
    let source = FakeSource::new()
        .respond("1", vec![rec("10", "A")])
        .respond("2", vec![rec("20", "B")]);
    let gate = source.gate("1");
    let (form, dom, _source) = form(source);

    let first = form.on_organization_change("1");
    let second = form.on_organization_change("2");

    let second = second.await.unwrap().unwrap();
    gate.send(()).unwrap();
    let first = first.await.unwrap().unwrap();

    assert!(matches!(second, Outcome::Applied(_)));
    assert!(matches!(first, Outcome::Superseded { .. }));
    assert_eq!(snapshot(&dom, "id_department")[1].0, "20");
}

#[tokio::test]
async fn test_department_change_handler() {
    let (form, dom, _source) = form(FakeSource::new().respond("3", vec![rec("7", "Driver")]));

    let outcome = form.on_department_change("3").await.unwrap().unwrap();

    assert_eq!(outcome.applied().unwrap().options.len(), 2);
    assert_eq!(snapshot(&dom, "id_designation")[1].1, "Driver");
}
