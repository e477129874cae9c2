use crate::theme::Theme;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ThemeToggleProps {
    pub theme: Theme,
    pub on_toggle: Callback<()>,
}

/// Fixed corner button that flips the colour scheme. The glyph previews the
/// scheme the click would switch to.
#[function_component(ThemeToggle)]
pub fn theme_toggle(props: &ThemeToggleProps) -> Html {
    let toggle_cb = {
        let cb = props.on_toggle.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <button onclick={toggle_cb} title="Toggle colour scheme" aria-label="Toggle colour scheme"
            style="position:fixed; top:16px; right:16px; z-index:100; width:40px; height:40px; border-radius:50%; border:1px solid rgba(128,128,128,0.35); background:transparent; font-size:18px; line-height:1; cursor:pointer;">
            { props.theme.glyph() }
        </button>
    }
}
