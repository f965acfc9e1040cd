use yew::prelude::*;

use crate::maze::MazeBoard;
use crate::memory::MemoryBoard;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Tab {
    Memory,
    Maze,
}

impl Tab {
    pub(crate) const ALL: [Tab; 2] = [Tab::Memory, Tab::Maze];

    /// Element id of the section shown for this tab.
    pub(crate) const fn id(self) -> &'static str {
        use Tab::*;
        match self {
            Memory => "memory",
            Maze => "maze",
        }
    }

    pub(crate) const fn title(self) -> &'static str {
        use Tab::*;
        match self {
            Memory => "Memory Game",
            Maze => "Maze Game",
        }
    }
}

impl Default for Tab {
    fn default() -> Self {
        Self::Memory
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct AppProps {
    #[prop_or_default]
    pub seed: Option<u64>,
}

/// Both games stay mounted, switching tabs only moves the `active` class.
#[function_component]
pub(crate) fn App(props: &AppProps) -> Html {
    let active = use_state(Tab::default);

    let tabs = Tab::ALL.into_iter().map(|tab| {
        let onclick = {
            let active = active.clone();
            Callback::from(move |_: MouseEvent| {
                log::debug!("show tab: {}", tab.id());
                active.set(tab);
            })
        };
        let class = classes!("tab", (*active == tab).then_some("active"));
        html! {
            <button {class} {onclick}>{tab.title()}</button>
        }
    });

    let section = |tab: Tab, body: Html| {
        let class = classes!("content", (*active == tab).then_some("active"));
        html! {
            <section id={tab.id()} {class}>{body}</section>
        }
    };

    html! {
        <main class="playroom">
            <nav>{ for tabs }</nav>
            { section(Tab::Memory, html! { <MemoryBoard seed={props.seed} /> }) }
            { section(Tab::Maze, html! { <MazeBoard seed={props.seed} /> }) }
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_ids_are_distinct() {
        assert_ne!(Tab::Memory.id(), Tab::Maze.id());
        assert_eq!(Tab::default(), Tab::Memory);
    }
}
