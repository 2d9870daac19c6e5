use html::{component, html};

#[component]
fn Choice(value: String, checked: Option<bool>) {
	html! {
		<label class="choice">
			<input type="radio" value={value} checked={checked} />
			{children}
		</label>
	}
}

#[test]
fn test_component_renders_children() {
	let html = html! {
		<Choice value={"yes".to_owned()} checked={Some(true)}>
			{"Yes"}
		</Choice>
	}
	.render_to_string();
	assert_eq!(
		html,
		r#"<label class="choice"><input type="radio" value="yes" checked />Yes</label>"#
	);
}

#[test]
fn test_dashed_and_keyword_attribute_keys() {
	let id = "user_active".to_owned();
	let html = html!(<label for={id} data-kind="boolean">{"Active"}</label>).render_to_string();
	assert_eq!(
		html,
		r#"<label for="user_active" data-kind="boolean">Active</label>"#
	);
}

#[test]
fn test_fragment_and_absent_values() {
	let prompt: Option<String> = None;
	let html = html! {
		<>
			<option value="">{prompt}</option>
			<option value="1" disabled={Some(false)}>{"<One>"}</option>
		</>
	}
	.render_to_string();
	assert_eq!(
		html,
		r#"<option value=""></option><option value="1">&lt;One&gt;</option>"#
	);
}
