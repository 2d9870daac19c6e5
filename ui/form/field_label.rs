use html::{component, html};

#[component]
pub fn FieldLabel(class: Option<String>, html_for: Option<String>) {
	html! {
		<label class={class} for={html_for}>
			{children}
		</label>
	}
}
