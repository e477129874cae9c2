mod components;
mod model;
mod theme;
mod util;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
