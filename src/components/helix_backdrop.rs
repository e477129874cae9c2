use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::model::HelixField;
use crate::model::helix::{SCROLL_BOOST_MS, SCROLL_BOOST_MULTIPLIER, Strand};
use crate::theme::{self, Theme};

#[derive(Properties, PartialEq, Clone)]
pub struct HelixBackdropProps {
    pub theme: Theme,
}

/// Full-viewport canvas behind the page content, scrolling a field of
/// double helixes downwards. Page scrolling nudges the drift speed.
#[function_component(HelixBackdrop)]
pub fn helix_backdrop(props: &HelixBackdropProps) -> Html {
    let canvas_ref = use_node_ref();
    let field = use_mut_ref(|| None::<HelixField>);
    let palette = use_mut_ref(|| theme::palette(Theme::default()));

    // Effect: swap strand colours with the theme. Only the palette cell
    // changes; the field keeps drifting where it was and the next frame
    // picks the new colours up.
    {
        let palette_ref = palette.clone();
        let current = props.theme;
        use_effect_with(current, move |_| {
            *palette_ref.borrow_mut() = theme::palette(current);
            || ()
        });
    }

    // Main mount effect (canvas size, field seeding, loop, listeners)
    {
        let canvas_ref = canvas_ref.clone();
        let field_setup = field.clone();
        let palette_setup = palette.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let canvas: HtmlCanvasElement = canvas_ref.cast::<HtmlCanvasElement>().expect("canvas");
            let apply_canvas_size = {
                let canvas = canvas.clone();
                let window = window.clone();
                move || {
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(800.0);
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(600.0);
                    canvas.set_width(width.max(0.0) as u32);
                    canvas.set_height(height.max(0.0) as u32);
                }
            };
            apply_canvas_size();
            *field_setup.borrow_mut() = Some(HelixField::new(
                canvas.width() as f64,
                canvas.height() as f64,
                &mut || js_sys::Math::random(),
            ));
            // Draw closure
            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let field = field_setup.clone();
                let palette = palette_setup.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let ctx = match canvas.get_context("2d").ok().flatten() {
                        Some(c) => c.dyn_into::<CanvasRenderingContext2d>().unwrap(),
                        None => return,
                    };
                    let field = field.borrow();
                    let Some(field) = field.as_ref() else { return };
                    let colors = *palette.borrow();
                    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
                    for helix in &field.helixes {
                        for point in helix.depth_sorted_points() {
                            let rgb = match point.strand {
                                Strand::Primary => colors.primary,
                                Strand::Secondary => colors.secondary,
                            };
                            ctx.set_fill_style_str(&rgb.css_rgba(helix.point_alpha(point.z)));
                            ctx.begin_path();
                            ctx.arc(point.x, point.y, helix.point_size(point.z), 0.0, TAU)
                                .ok();
                            ctx.fill();
                        }
                    }
                })
            };
            (draw_closure)();
            // RAF loop: advance the field one frame, then repaint.
            let raf_id = Rc::new(RefCell::new(None));
            {
                let raf_id_clone = raf_id.clone();
                let field_loop = field_setup.clone();
                let draw_loop = draw_closure.clone();
                let window_loop = window.clone();
                let closure_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                    Rc::new(RefCell::new(None));
                let closure_cell_clone = closure_cell.clone();
                *closure_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    if let Some(field) = field_loop.borrow_mut().as_mut() {
                        field.step(&mut || js_sys::Math::random());
                    }
                    draw_loop();
                    if let Ok(id) = window_loop.request_animation_frame(
                        closure_cell_clone
                            .borrow()
                            .as_ref()
                            .unwrap()
                            .as_ref()
                            .unchecked_ref(),
                    ) {
                        *raf_id_clone.borrow_mut() = Some(id);
                    }
                })
                    as Box<dyn FnMut()>));
                if let Ok(id) = window.request_animation_frame(
                    closure_cell
                        .borrow()
                        .as_ref()
                        .unwrap()
                        .as_ref()
                        .unchecked_ref(),
                ) {
                    *raf_id.borrow_mut() = Some(id);
                }
            }
            // Scroll boost. Every scroll event schedules its own revert, so a
            // long burst slows back down one window after its first event,
            // not its last.
            let boost_timeout_id = Rc::new(RefCell::new(None));
            let boost_revert = {
                let field = field_setup.clone();
                Closure::wrap(Box::new(move || {
                    if let Some(field) = field.borrow_mut().as_mut() {
                        field.set_speed_multiplier(1.0);
                    }
                }) as Box<dyn FnMut()>)
            };
            let scroll_cb = {
                let field = field_setup.clone();
                let window_scroll = window.clone();
                let boost_timeout_id = boost_timeout_id.clone();
                let revert_fn = boost_revert
                    .as_ref()
                    .unchecked_ref::<js_sys::Function>()
                    .clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    if let Some(field) = field.borrow_mut().as_mut() {
                        field.set_speed_multiplier(SCROLL_BOOST_MULTIPLIER);
                    }
                    if let Ok(id) = window_scroll
                        .set_timeout_with_callback_and_timeout_and_arguments_0(
                            &revert_fn,
                            SCROLL_BOOST_MS,
                        )
                    {
                        *boost_timeout_id.borrow_mut() = Some(id);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("scroll", scroll_cb.as_ref().unchecked_ref())
                .unwrap();
            // Resize keeps the canvas and the spawn bounds in sync. Repaint
            // is left to the frame already scheduled.
            let resize_cb = {
                let apply_canvas_size = apply_canvas_size.clone();
                let canvas_rs = canvas.clone();
                let field = field_setup.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    apply_canvas_size();
                    if let Some(field) = field.borrow_mut().as_mut() {
                        field.resize(canvas_rs.width() as f64, canvas_rs.height() as f64);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .unwrap();
            // Cleanup
            let window_clone = window.clone();
            move || {
                let _ = window_clone.remove_event_listener_with_callback(
                    "scroll",
                    scroll_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                if let Some(id) = *raf_id.borrow() {
                    let _ = window_clone.cancel_animation_frame(id);
                }
                if let Some(id) = *boost_timeout_id.borrow() {
                    window_clone.clear_timeout_with_handle(id);
                }
                let _keep_alive = (&scroll_cb, &resize_cb, &boost_revert);
            }
        });
    }

    html! {
        <canvas ref={canvas_ref.clone()} id="dna-canvas" style="position:fixed; top:0; left:0; z-index:-2;"></canvas>
    }
}
