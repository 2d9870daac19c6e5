use super::{choice_id, Attributes, Choice, FieldLabel};
use html::{component, html};

#[component]
pub fn CollectionCheckBoxes(
	attributes: Attributes,
	choices: Vec<Choice>,
	class: String,
	id: String,
	name: String,
) {
	let name = format!("{}[]", name);
	// Browsers submit nothing for an empty check box group, so an empty value keeps the field in the request.
	let hidden = html! {
		<input name={name.clone()} type="hidden" value="" />
	};
	let boxes = choices
		.into_iter()
		.map(|choice| {
			let choice_id = choice_id(&id, &choice.value);
			let input = html! {
				<input
					checked={Some(choice.checked)}
					class={class.clone()}
					disabled={Some(choice.disabled)}
					id={choice_id.clone()}
					name={name.clone()}
					type="checkbox"
					value={choice.value}
				/>
			}
			.with_attributes(attributes.clone());
			html! {
				<span class="checkbox">
					{input}
					<FieldLabel
						class={Some("collection_check_boxes".to_owned())}
						html_for={Some(choice_id)}
					>
						{choice.text}
					</FieldLabel>
				</span>
			}
		})
		.collect::<Vec<_>>();
	html! {
		<>
			{hidden}
			{boxes}
		</>
	}
}

#[test]
fn test_collection_check_boxes() {
	let html = html! {
		<CollectionCheckBoxes
			attributes={Vec::new()}
			choices={vec![Choice::new("Ruby", "1").checked(true), Choice::new("Rust", "2")]}
			class={"check_boxes".to_owned()}
			id={"user_language_ids".to_owned()}
			name={"user[language_ids]".to_owned()}
		/>
	}
	.render_to_string();
	insta::assert_snapshot!(html, @r###"<input name="user[language_ids][]" type="hidden" value="" /><span class="checkbox"><input checked class="check_boxes" id="user_language_ids_1" name="user[language_ids][]" type="checkbox" value="1" /><label class="collection_check_boxes" for="user_language_ids_1">Ruby</label></span><span class="checkbox"><input class="check_boxes" id="user_language_ids_2" name="user[language_ids][]" type="checkbox" value="2" /><label class="collection_check_boxes" for="user_language_ids_2">Rust</label></span>"###);
}
