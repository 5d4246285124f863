use cascade::markup::{Element, html_escape, option, select};

#[test]
fn test_render_option_with_attributes_in_order() {
    let html = option()
        .attr("value", "")
        .attr("selected", "selected")
        .text("---------")
        .render();
    assert_eq!(html, r#"<option value="" selected="selected">---------</option>"#);
}

#[test]
fn test_attr_replaces_in_place() {
    let html = Element::new("option")
        .attr("value", "1")
        .attr("class", "a")
        .attr("value", "2")
        .render();
    assert_eq!(html, r#"<option value="2" class="a"></option>"#);
}

#[test]
fn test_attr_if() {
    assert_eq!(
        option().attr_if(false, "selected", "selected").render(),
        "<option></option>"
    );
    assert_eq!(
        option().attr_if(true, "selected", "selected").render(),
        r#"<option selected="selected"></option>"#
    );
}

#[test]
fn test_text_and_attributes_are_escaped() {
    let html = option()
        .attr("value", "a\"b")
        .text("R&D <Lab>")
        .render();
    assert_eq!(
        html,
        r#"<option value="a&quot;b">R&amp;D &lt;Lab&gt;</option>"#
    );
    assert_eq!(html_escape("it's"), "it&#39;s");
}

#[test]
fn test_children_and_inner_render() {
    let el = select()
        .attr("id", "id_department")
        .child(option().attr("value", "1").text("HR"))
        .children(vec![option().attr("value", "2").text("Eng")]);

    assert_eq!(
        el.render_inner(),
        r#"<option value="1">HR</option><option value="2">Eng</option>"#
    );
    assert!(el.render().starts_with(r#"<select id="id_department">"#));
    assert!(el.render().ends_with("</select>"));
}

#[test]
fn test_children_appends_in_order() {
    let first = option().attr("value", "1").text("HR");
    let second = option().attr("value", "2").text("Eng");
    assert_eq!(
        select().children([first.clone(), second.clone()]),
        select().child(first).child(second)
    );
}
