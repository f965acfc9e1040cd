use std::time::Duration;

use gloo::timers::callback::Timeout;
use playroom_core as game;
use game::{CardFace, CardId, MemoryConfig, MemoryGame, RevertScheduler, RevertTicket};
use yew::html::Scope;
use yew::prelude::*;

use crate::utils::js_random_seed;

/// Fires reverts through a `gloo` timeout that messages the board back.
pub(crate) struct TimeoutScheduler {
    link: Scope<MemoryBoard>,
}

impl RevertScheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&mut self, ticket: RevertTicket, delay: Duration) -> Timeout {
        let link = self.link.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        log::trace!("revert {:?} in {}ms", ticket, millis);
        Timeout::new(millis, move || link.send_message(Msg::Revert(ticket)))
    }

    fn cancel(&mut self, handle: Timeout) {
        // dropping a gloo timeout clears it
        drop(handle);
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Flip(CardId),
    Revert(RevertTicket),
    Restart,
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct MemoryProps {
    #[prop_or_default]
    pub seed: Option<u64>,
}

impl MemoryProps {
    /// Seed for every deal, so a fixed seed replays the same board after a restart too.
    fn deal_seed(&self) -> u64 {
        self.seed.unwrap_or_else(js_random_seed)
    }
}

pub(crate) struct MemoryBoard {
    game: MemoryGame<TimeoutScheduler>,
}

impl MemoryBoard {
    fn view_card(&self, link: &Scope<Self>, id: CardId) -> Html {
        let Ok(card) = self.game.card(id) else {
            return html! {};
        };
        let emoji = card.emoji().unwrap_or_default().to_string();

        let class = classes!(
            "card",
            match card.face() {
                CardFace::Hidden => classes!(),
                CardFace::Revealed => classes!("flipped"),
                CardFace::Matched => classes!("flipped", "matched"),
            }
        );
        let text = if card.face().is_face_up() {
            emoji.clone()
        } else {
            String::new()
        };
        // matched cards drop their handler for good
        let onclick = (card.face() != CardFace::Matched)
            .then(|| link.callback(move |_: MouseEvent| Msg::Flip(id)));

        html! {
            <div {class} data-emoji={emoji} {onclick}>{text}</div>
        }
    }
}

impl Component for MemoryBoard {
    type Message = Msg;
    type Properties = MemoryProps;

    fn create(ctx: &Context<Self>) -> Self {
        let scheduler = TimeoutScheduler {
            link: ctx.link().clone(),
        };
        Self {
            game: MemoryGame::new(&MemoryConfig::default(), scheduler, ctx.props().deal_seed()),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Flip(id) => match self.game.flip(id) {
                Ok(outcome) => {
                    log::trace!("flip {:?}: {:?}", id, outcome);
                    outcome.has_update()
                }
                Err(err) => {
                    log::error!("flip {:?} failed: {}", id, err);
                    false
                }
            },
            Msg::Revert(ticket) => self.game.complete_revert(ticket).has_update(),
            Msg::Restart => {
                log::debug!("new memory board");
                self.game.restart(ctx.props().deal_seed());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let board_class = classes!("board", self.game.is_locked().then_some("locked"));
        let cards = self
            .game
            .display_order()
            .iter()
            .map(|&id| self.view_card(link, id));

        html! {
            <div class="memory">
                <div class={board_class}>{ for cards }</div>
                <button class="restart" onclick={link.callback(|_: MouseEvent| Msg::Restart)}>
                    {"Main lagi"}
                </button>
            </div>
        }
    }
}
