use super::{choice_id, Attributes, Choice, FieldLabel};
use html::{component, html};

#[component]
pub fn CollectionRadioButtons(
	attributes: Attributes,
	choices: Vec<Choice>,
	class: String,
	id: String,
	name: String,
) {
	let buttons = choices
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
					type="radio"
					value={choice.value}
				/>
			}
			.with_attributes(attributes.clone());
			html! {
				<span class="radio">
					{input}
					<FieldLabel
						class={Some("collection_radio_buttons".to_owned())}
						html_for={Some(choice_id)}
					>
						{choice.text}
					</FieldLabel>
				</span>
			}
		})
		.collect::<Vec<_>>();
	html! {
		<>{buttons}</>
	}
}

#[test]
fn test_collection_radio_buttons() {
	let html = html! {
		<CollectionRadioButtons
			attributes={vec![("required".into(), true.into())]}
			choices={vec![Choice::new("Yes", "true"), Choice::new("No", "false").checked(true)]}
			class={"radio_buttons".to_owned()}
			id={"user_active".to_owned()}
			name={"user[active]".to_owned()}
		/>
	}
	.render_to_string();
	insta::assert_snapshot!(html, @r###"<span class="radio"><input class="radio_buttons" id="user_active_true" name="user[active]" type="radio" value="true" required /><label class="collection_radio_buttons" for="user_active_true">Yes</label></span><span class="radio"><input checked class="radio_buttons" id="user_active_false" name="user[active]" type="radio" value="false" required /><label class="collection_radio_buttons" for="user_active_false">No</label></span>"###);
}
