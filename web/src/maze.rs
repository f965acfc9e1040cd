use gloo::events::{EventListener, EventListenerOptions};
use playroom_core as game;
use game::{Direction, MazeController, MazeStyle};
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, HtmlCanvasElement, KeyboardEvent};
use yew::prelude::*;

use crate::canvas::CanvasSurface;
use crate::utils::js_random_seed;

/// Canvas size in pixels, the grid is this divided by the tile size.
const CANVAS_SIZE: (u32, u32) = (600, 600);

/// On-screen buttons in layout order.
const CONTROLS: [(Direction, &str); 4] = [
    (Direction::Up, "▲"),
    (Direction::Left, "◀"),
    (Direction::Down, "▼"),
    (Direction::Right, "▶"),
];

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Move(Direction),
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct MazeProps {
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) struct MazeBoard {
    controller: Option<MazeController>,
    canvas: NodeRef,
    _keydown: EventListener,
}

impl MazeBoard {
    fn surface(&self) -> Option<CanvasSurface> {
        let canvas = self.canvas.cast::<HtmlCanvasElement>()?;
        CanvasSurface::from_canvas(&canvas)
    }

    fn create_keydown_listener(ctx: &Context<Self>) -> EventListener {
        let link = ctx.link().clone();
        arrow_key_listener(&gloo::utils::document(), move |direction| {
            link.send_message(Msg::Move(direction))
        })
    }
}

/// Listens for arrow keys on `target` and swallows them so the page does not scroll.
fn arrow_key_listener(
    target: &EventTarget,
    mut on_move: impl FnMut(Direction) + 'static,
) -> EventListener {
    // `preventDefault` is ignored by passive listeners
    EventListener::new_with_options(
        target,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if let Some(direction) = Direction::from_key(&event.key()) {
                event.prevent_default();
                on_move(direction);
            }
        },
    )
}

impl Component for MazeBoard {
    type Message = Msg;
    type Properties = MazeProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let controller = match MazeController::generate(seed, CANVAS_SIZE, MazeStyle::default()) {
            Ok(controller) => Some(controller),
            Err(err) => {
                log::error!("could not build maze: {}", err);
                None
            }
        };

        Self {
            controller,
            canvas: NodeRef::default(),
            _keydown: Self::create_keydown_listener(ctx),
        }
    }

    /// Draws straight onto the canvas, so the virtual DOM never needs to re-render.
    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        let Msg::Move(direction) = msg;

        let Some(mut surface) = self.surface() else {
            log::warn!("maze canvas not ready, dropping {:?}", direction);
            return false;
        };
        let Some(controller) = self.controller.as_mut() else {
            return false;
        };

        let outcome = controller.handle(direction, &mut surface, &mut |message: &str| {
            gloo::dialogs::alert(message)
        });
        log::trace!("move {:?}: {:?}", direction, outcome);
        false
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let Some(controller) = &self.controller else {
            return;
        };
        if let Some(mut surface) = self.surface() {
            controller.redraw(&mut surface);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let (width, height) = CANVAS_SIZE;

        // buttons are told apart by their `data-move` label, like any other control element
        let onclick = ctx.link().batch_callback(|event: MouseEvent| {
            let label = event
                .current_target()?
                .dyn_into::<Element>()
                .ok()?
                .get_attribute("data-move")?;
            let direction = Direction::from_control_label(&label);
            if direction.is_none() {
                log::warn!("unknown control label: {:?}", label);
            }
            direction.map(Msg::Move)
        });

        let buttons = CONTROLS.into_iter().map(|(direction, arrow)| {
            html! {
                <button class="btn-control" data-move={direction.label()} onclick={onclick.clone()}>
                    {arrow}
                </button>
            }
        });

        html! {
            <div class="maze">
                <canvas
                    id="mazeCanvas"
                    ref={self.canvas.clone()}
                    width={width.to_string()}
                    height={height.to_string()}
                />
                <div class="controls">{ for buttons }</div>
            </div>
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;
    use web_sys::KeyboardEventInit;

    wasm_bindgen_test_configure!(run_in_browser);

    fn keydown(key: &str) -> KeyboardEvent {
        let init = KeyboardEventInit::new();
        init.set_key(key);
        init.set_cancelable(true);
        KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap()
    }

    #[wasm_bindgen_test]
    fn arrow_keys_are_swallowed_and_forwarded() {
        let target = gloo::utils::document().create_element("div").unwrap();
        let moves = Rc::new(RefCell::new(Vec::new()));
        let _listener = arrow_key_listener(&target, {
            let moves = moves.clone();
            move |direction| moves.borrow_mut().push(direction)
        });

        // `dispatch_event` is false once a listener cancelled the event
        assert!(!target.dispatch_event(&keydown("ArrowUp")).unwrap());
        assert!(!target.dispatch_event(&keydown("ArrowRight")).unwrap());
        assert_eq!(*moves.borrow(), [Direction::Up, Direction::Right]);
    }

    #[wasm_bindgen_test]
    fn other_keys_keep_their_default() {
        let target = gloo::utils::document().create_element("div").unwrap();
        let moves = Rc::new(RefCell::new(Vec::new()));
        let _listener = arrow_key_listener(&target, {
            let moves = moves.clone();
            move |direction| moves.borrow_mut().push(direction)
        });

        assert!(target.dispatch_event(&keydown("Enter")).unwrap());
        assert!(moves.borrow().is_empty());
    }
}
