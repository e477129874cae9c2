use yew::prelude::*;

use super::{
    helix_backdrop::HelixBackdrop, snake_backdrop::SnakeBackdrop, theme_toggle::ThemeToggle,
};
use crate::model::Mode;
use crate::theme;

#[function_component(App)]
pub fn app() -> Html {
    let theme_state = use_state(theme::load);
    let snake_mode = use_state(|| Mode::Autonomous);

    // Persist the choice and mirror it onto <html data-theme> for the CSS.
    {
        let current = *theme_state;
        use_effect_with(current, move |_| {
            theme::persist(current);
            theme::apply_to_document(current);
            || ()
        });
    }

    let toggle_theme = {
        let theme_state = theme_state.clone();
        Callback::from(move |_| theme_state.set(theme_state.toggled()))
    };
    let on_mode_change = {
        let snake_mode = snake_mode.clone();
        Callback::from(move |mode: Mode| snake_mode.set(mode))
    };

    // While the visitor plays, the page chrome steps aside: the content and
    // the toggle disappear and the snake canvas comes to the front.
    let playing = *snake_mode == Mode::Player;
    let main_style = if playing { "display:none;" } else { "" };

    html! {
        <>
            <HelixBackdrop theme={*theme_state} />
            <SnakeBackdrop mode={*snake_mode} on_mode_change={on_mode_change} />
            { if playing { html! {} } else {
                html! { <ThemeToggle theme={*theme_state} on_toggle={toggle_theme} /> }
            } }
            <main style={main_style}>
                <header>
                    <h1>{ "Computational Genomics Lab" }</h1>
                    <p class="tagline">{ "Sequence analysis, structural modelling, and the occasional detour into visualisation." }</p>
                </header>
                <section id="about">
                    <h2>{ "About" }</h2>
                    <p>{ "We study how genome structure shapes regulation, combining long-read \
                          sequencing with physical models of chromatin. The animations behind \
                          this page are our own small homage to the molecule that keeps us busy." }</p>
                </section>
                <section id="research">
                    <h2>{ "Research" }</h2>
                    <p>{ "Current projects span assembly graph algorithms, nanopore signal \
                          processing, and coarse-grained simulation of DNA packing." }</p>
                </section>
                <section id="teaching">
                    <h2>{ "Teaching" }</h2>
                    <p>{ "Introductory bioinformatics and a graduate seminar on probabilistic \
                          models for sequence data. Course notes are available on request." }</p>
                </section>
                <section id="contact">
                    <h2>{ "Contact" }</h2>
                    <p>{ "Office hours Tuesday afternoons. Found the snake? Double-click it." }</p>
                </section>
            </main>
        </>
    }
}
