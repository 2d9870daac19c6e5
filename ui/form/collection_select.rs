use super::{Attributes, Choice};
use html::{component, html, Node};

pub const PRIORITY_DIVIDER: &str = "-------------";

#[component]
pub fn CollectionSelect(
	attributes: Attributes,
	choices: Vec<Choice>,
	class: String,
	id: String,
	include_blank: bool,
	multiple: bool,
	name: String,
	priority: Vec<Choice>,
	prompt: Option<String>,
) {
	let prompt = prompt.map(|prompt| {
		html! {
			<option value="">{prompt}</option>
		}
	});
	let blank = if include_blank {
		Some(html! {
			<option value=""></option>
		})
	} else {
		None
	};
	let divider = if priority.is_empty() {
		None
	} else {
		Some(html! {
			<option value="" disabled={true}>{PRIORITY_DIVIDER}</option>
		})
	};
	let name = if multiple { format!("{}[]", name) } else { name };
	let select = html! {
		<select
			class={class}
			id={id}
			multiple={Some(multiple)}
			name={name}
		>
			{prompt}
			{blank}
			{priority.iter().map(option).collect::<Vec<_>>()}
			{divider}
			{choices.iter().map(option).collect::<Vec<_>>()}
		</select>
	};
	select.with_attributes(attributes)
}

fn option(choice: &Choice) -> Node {
	html! {
		<option
			disabled={Some(choice.disabled)}
			selected={Some(choice.checked)}
			value={choice.value.clone()}
		>
			{choice.text.clone()}
		</option>
	}
}

#[test]
fn test_collection_select() {
	let choices = vec![
		Choice::new("Yes", "true").checked(true),
		Choice::new("No", "false"),
	];
	let html = html! {
		<CollectionSelect
			attributes={vec![("required".into(), true.into())]}
			choices={choices}
			class={"select".to_owned()}
			id={"user_active".to_owned()}
			include_blank={true}
			multiple={false}
			name={"user[active]".to_owned()}
			priority={Vec::new()}
			prompt={None}
		/>
	}
	.render_to_string();
	insta::assert_snapshot!(html, @r###"<select class="select" id="user_active" name="user[active]" required><option value=""></option><option selected value="true">Yes</option><option value="false">No</option></select>"###);
}

#[test]
fn test_collection_select_priority_and_prompt() {
	let html = html! {
		<CollectionSelect
			attributes={Vec::new()}
			choices={vec![Choice::new("Brazil", "BR")]}
			class={"select".to_owned()}
			id={"user_country".to_owned()}
			include_blank={false}
			multiple={true}
			name={"user[country]".to_owned()}
			priority={vec![Choice::new("Germany", "DE")]}
			prompt={Some("Please select".to_owned())}
		/>
	}
	.render_to_string();
	insta::assert_snapshot!(html, @r###"<select class="select" id="user_country" multiple name="user[country][]"><option value="">Please select</option><option value="DE">Germany</option><option value="" disabled>-------------</option><option value="BR">Brazil</option></select>"###);
}
