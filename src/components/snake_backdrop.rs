use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use crate::model::snake::{CELL_PX, TICK_MS};
use crate::model::{Cell, Direction, Mode, SnakeGame};
use crate::util::clog;

#[derive(Properties, PartialEq, Clone)]
pub struct SnakeBackdropProps {
    pub mode: Mode,
    pub on_mode_change: Callback<Mode>,
}

/// Full-viewport snake canvas. Idles behind the content chasing food on its
/// own; a double click on the snake brings it to the front as a playable
/// game until the exit button hands it back.
#[function_component(SnakeBackdrop)]
pub fn snake_backdrop(props: &SnakeBackdropProps) -> Html {
    let canvas_ref = use_node_ref();
    let game = use_mut_ref(|| None::<SnakeGame>);

    // Main mount effect (canvas size, game state, loop, listeners)
    {
        let canvas_ref = canvas_ref.clone();
        let game_setup = game.clone();
        let on_mode_change = props.on_mode_change.clone();
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
            let mut fresh = SnakeGame::new(
                (canvas.width() as f64 / CELL_PX).floor() as i32,
                (canvas.height() as f64 / CELL_PX).floor() as i32,
                &mut || js_sys::Math::random(),
            );
            fresh.set_mode_sink(Rc::new({
                let on_mode_change = on_mode_change.clone();
                move |mode| {
                    clog(&format!("snake mode -> {:?}", mode));
                    on_mode_change.emit(mode);
                }
            }));
            *game_setup.borrow_mut() = Some(fresh);
            // Draw closure
            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let game = game_setup.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let ctx = match canvas.get_context("2d").ok().flatten() {
                        Some(c) => c.dyn_into::<CanvasRenderingContext2d>().unwrap(),
                        None => return,
                    };
                    let game = game.borrow();
                    let Some(game) = game.as_ref() else { return };
                    let w = canvas.width() as f64;
                    let h = canvas.height() as f64;
                    // Translucent wash instead of a clear, so previous frames
                    // decay into a short motion trail.
                    ctx.set_fill_style_str("rgba(0, 0, 0, 0.1)");
                    ctx.fill_rect(0.0, 0.0, w, h);
                    ctx.set_fill_style_str(match game.mode {
                        Mode::Player => "#4CAF50",
                        Mode::Autonomous => "#2196F3",
                    });
                    for cell in &game.snake {
                        ctx.fill_rect(
                            cell.x as f64 * CELL_PX,
                            cell.y as f64 * CELL_PX,
                            CELL_PX - 1.0,
                            CELL_PX - 1.0,
                        );
                    }
                    ctx.set_fill_style_str("#FF5722");
                    ctx.fill_rect(
                        game.food.x as f64 * CELL_PX,
                        game.food.y as f64 * CELL_PX,
                        CELL_PX - 1.0,
                        CELL_PX - 1.0,
                    );
                })
            };
            (draw_closure)();
            // Game loop: step and repaint, then wait a beat before asking for
            // the next animation frame. The pause sets the pace; the frame
            // keeps the repaint aligned with the display.
            let raf_id = Rc::new(RefCell::new(None));
            let tick_timeout_id = Rc::new(RefCell::new(None));
            {
                let step_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                    Rc::new(RefCell::new(None));
                let arm_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> =
                    Rc::new(RefCell::new(None));
                {
                    let raf_id_clone = raf_id.clone();
                    let step_cell_arm = step_cell.clone();
                    let window_arm = window.clone();
                    *arm_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                        if let Some(step) = step_cell_arm.borrow().as_ref() {
                            if let Ok(id) =
                                window_arm.request_animation_frame(step.as_ref().unchecked_ref())
                            {
                                *raf_id_clone.borrow_mut() = Some(id);
                            }
                        }
                    })
                        as Box<dyn FnMut()>));
                }
                {
                    let game_loop = game_setup.clone();
                    let draw_loop = draw_closure.clone();
                    let arm_cell_clone = arm_cell.clone();
                    let tick_timeout_id_clone = tick_timeout_id.clone();
                    let window_loop = window.clone();
                    *step_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                        if let Some(game) = game_loop.borrow_mut().as_mut() {
                            game.step(&mut || js_sys::Math::random());
                        }
                        draw_loop();
                        if let Some(arm) = arm_cell_clone.borrow().as_ref() {
                            if let Ok(id) = window_loop
                                .set_timeout_with_callback_and_timeout_and_arguments_0(
                                    arm.as_ref().unchecked_ref(),
                                    TICK_MS,
                                )
                            {
                                *tick_timeout_id_clone.borrow_mut() = Some(id);
                            }
                        }
                    })
                        as Box<dyn FnMut()>));
                }
                if let Ok(id) = window.request_animation_frame(
                    step_cell
                        .borrow()
                        .as_ref()
                        .unwrap()
                        .as_ref()
                        .unchecked_ref(),
                ) {
                    *raf_id.borrow_mut() = Some(id);
                }
            }
            // Double click on the snake body hands control to the visitor.
            let dblclick_cb = {
                let game = game_setup.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let cell = Cell {
                        x: (e.client_x() as f64 / CELL_PX).floor() as i32,
                        y: (e.client_y() as f64 / CELL_PX).floor() as i32,
                    };
                    if let Some(game) = game.borrow_mut().as_mut() {
                        game.try_enter_player(cell);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("dblclick", dblclick_cb.as_ref().unchecked_ref())
                .unwrap();
            // Arrow keys steer, but only while the visitor is driving.
            let keydown_cb = {
                let game = game_setup.clone();
                Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
                    let mut game = game.borrow_mut();
                    let Some(game) = game.as_mut() else { return };
                    if game.mode != Mode::Player {
                        return;
                    }
                    if let Some(dir) = Direction::from_key(&e.key()) {
                        e.prevent_default();
                        game.steer(dir);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .unwrap();
            // Resize re-derives the grid; the clamp in resize() keeps it
            // sane. The next tick repaints at the new size.
            let resize_cb = {
                let apply_canvas_size = apply_canvas_size.clone();
                let canvas_rs = canvas.clone();
                let game = game_setup.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    apply_canvas_size();
                    if let Some(game) = game.borrow_mut().as_mut() {
                        game.resize(
                            (canvas_rs.width() as f64 / CELL_PX).floor() as i32,
                            (canvas_rs.height() as f64 / CELL_PX).floor() as i32,
                        );
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .unwrap();
            // Cleanup
            let window_clone = window.clone();
            move || {
                let _ = canvas.remove_event_listener_with_callback(
                    "dblclick",
                    dblclick_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                if let Some(id) = *raf_id.borrow() {
                    let _ = window_clone.cancel_animation_frame(id);
                }
                if let Some(id) = *tick_timeout_id.borrow() {
                    window_clone.clear_timeout_with_handle(id);
                }
                let _keep_alive = (&dblclick_cb, &keydown_cb, &resize_cb);
            }
        });
    }

    // In play the canvas rises above the page; idle it sits just behind it.
    let canvas_style = match props.mode {
        Mode::Player => "position:fixed; top:0; left:0; z-index:1;",
        Mode::Autonomous => "position:fixed; top:0; left:0; z-index:-1;",
    };
    let exit_cb = {
        let game = game.clone();
        Callback::from(move |_| {
            if let Some(game) = game.borrow_mut().as_mut() {
                game.exit_player();
            }
        })
    };

    html! {
        <>
            <canvas ref={canvas_ref.clone()} id="snake-canvas" style={canvas_style}></canvas>
            { if props.mode == Mode::Player {
                html! { <div onclick={exit_cb} title="Exit game"
                    style="position:fixed; top:20px; left:20px; z-index:1001; width:30px; height:30px; border-radius:50%; background:rgba(255,255,255,0.8); color:#111; display:flex; align-items:center; justify-content:center; font-size:22px; cursor:pointer;">
                    { "\u{00D7}" }
                </div> }
            } else {
                html! {}
            } }
        </>
    }
}
