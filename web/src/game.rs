use crate::utils::*;
use bountygrid_core as game;
use game::LayoutGenerator;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};
use yew::prelude::*;

/// Square edge in canvas pixels; the 12x12 grid fills a 480x480 surface.
const CELL_PX: u32 = 40;

const CELL_COLOR: &str = "#000";
const BOUNTY_COLOR: &str = "#ffd700";
const ENERGY_COLOR: &str = "#00ff00";
const REVEAL_TINT: &str = "#708090";
const GRID_LINE_COLOR: &str = "black";

/// Maps canvas-relative pixel coordinates to a grid cell, `None` outside the
/// grid (the pointer can sit exactly on the trailing edge).
fn pixel_to_cell(x: i32, y: i32, (cols, rows): game::Coord2) -> Option<game::Coord2> {
    if x < 0 || y < 0 {
        return None;
    }
    let cx = (x as u32) / CELL_PX;
    let cy = (y as u32) / CELL_PX;
    if cx < u32::from(cols) && cy < u32::from(rows) {
        Some((cx as game::Coord, cy as game::Coord))
    } else {
        None
    }
}

/// Layered paint decision for one cell: base fill, optional bounty label,
/// optional reveal tint, found blackout on top.
#[derive(Copy, Clone, Debug, PartialEq)]
struct CellPaint {
    base: &'static str,
    label: Option<&'static str>,
    tint: Option<&'static str>,
    cover: bool,
}

fn cell_paint(kind: game::SpecialCell, mark: game::CellMark) -> CellPaint {
    use game::SpecialCell::*;

    let (base, label) = match kind {
        Bounty => (BOUNTY_COLOR, Some("B")),
        Energy => (ENERGY_COLOR, None),
        Empty => (CELL_COLOR, None),
    };
    CellPaint {
        base,
        label,
        tint: matches!(mark, game::CellMark::Revealed).then_some(REVEAL_TINT),
        cover: mark.is_found(),
    }
}

fn level_seed(seed: u64, level: u32) -> u64 {
    seed.wrapping_add(u64::from(level))
}

/// Rolls the config and layout for the level after `config`: one more
/// bounty, a fresh energy stock in the restock range.
fn roll_next_level(
    config: &game::GameConfig,
    seed: u64,
) -> (game::GameConfig, game::SpecialLayout) {
    use rand::prelude::*;

    let mut rng = SmallRng::seed_from_u64(seed);
    let config = config.next_level(game::roll_level_energy(&mut rng));
    let layout = game::RandomLayoutGenerator::new(seed).generate(config);
    (config, layout)
}

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<game::ClickOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: game::ClickOutcome| outcome.has_update())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Hover(i32, i32),
    Click(i32, i32),
    NextLevel,
    ToggleTheme,
}

#[derive(Properties, Debug, Clone, PartialEq, Default)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    config: game::GameConfig,
    engine: game::GridGame,
    seed: u64,
    next_level_hidden: bool,
    canvas_ref: NodeRef,
}

impl GameView {
    fn is_playable(&self) -> bool {
        !self.engine.is_finished()
    }

    fn hover_cell(&mut self, x: i32, y: i32) -> bool {
        let Some(pos) = pixel_to_cell(x, y, self.engine.size()) else {
            return false;
        };
        self.engine.hover(pos).has_update()
    }

    fn click_cell(&mut self, x: i32, y: i32) -> bool {
        let Some(pos) = pixel_to_cell(x, y, self.engine.size()) else {
            return false;
        };
        log::debug!("click cell: {:?}", pos);
        self.engine.click(pos).has_update()
    }

    fn advance_level(&mut self) -> bool {
        let seed = level_seed(self.seed, self.engine.level() + 1);
        let (config, layout) = roll_next_level(&self.config, seed);
        match self.engine.advance_level(layout) {
            Ok(()) => {
                self.config = config;
                self.next_level_hidden = true;
                log::debug!("advanced to level {}", self.engine.level());
                true
            }
            Err(err) => {
                log::warn!("cannot advance level: {}", err);
                false
            }
        }
    }

    fn paint(&self, ctx: &CanvasRenderingContext2d) {
        let (cols, rows) = self.engine.size();
        let cell = f64::from(CELL_PX);

        for y in 0..rows {
            for x in 0..cols {
                let pos = (x, y);
                let paint = cell_paint(self.engine.kind_at(pos), self.engine.mark_at(pos));
                let px = f64::from(u32::from(x) * CELL_PX);
                let py = f64::from(u32::from(y) * CELL_PX);

                ctx.set_fill_style_str(paint.base);
                ctx.fill_rect(px, py, cell, cell);
                if let Some(label) = paint.label {
                    ctx.set_fill_style_str(CELL_COLOR);
                    ctx.set_font("20px Arial");
                    ctx.fill_text(label, px + cell / 2.0 - 6.0, py + cell / 2.0 + 6.0)
                        .ok();
                }
                if let Some(tint) = paint.tint {
                    ctx.set_fill_style_str(tint);
                    ctx.fill_rect(px, py, cell, cell);
                }
                if paint.cover {
                    ctx.set_fill_style_str(CELL_COLOR);
                    ctx.fill_rect(px, py, cell, cell);
                }
                ctx.set_stroke_style_str(GRID_LINE_COLOR);
                ctx.stroke_rect(px, py, cell, cell);
            }
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let config = game::GameConfig::first_level();
        let layout = game::RandomLayoutGenerator::new(level_seed(seed, 1)).generate(config);
        Self {
            config,
            engine: game::GridGame::new(1, layout),
            seed,
            next_level_hidden: false,
            canvas_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Hover(x, y) if self.is_playable() => self.hover_cell(x, y),
            Click(x, y) if self.is_playable() => self.click_cell(x, y),
            Hover(..) | Click(..) => false,
            NextLevel => self.advance_level(),
            ToggleTheme => {
                crate::theme::Theme::toggle();
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let (cols, rows) = self.engine.size();
        let finished = self.engine.is_finished();
        let energy = format_for_counter(self.engine.energy_count());
        let bounties = format_for_counter(i32::from(self.engine.bounty_count()));

        // pointer handlers are detached wholesale once the game is over
        let onmousemove = self
            .is_playable()
            .then(|| ctx.link().callback(|e: MouseEvent| Hover(e.offset_x(), e.offset_y())));
        let onclick = self
            .is_playable()
            .then(|| ctx.link().callback(|e: MouseEvent| Click(e.offset_x(), e.offset_y())));
        let cb_next_level = ctx.link().callback(|_| NextLevel);
        let cb_toggle_theme = ctx.link().callback(|_| ToggleTheme);

        let button_label = if finished { "Game Over" } else { "Next Level" };
        let button_class = classes!(self.next_level_hidden.then_some("d-none"));

        html! {
            <div class="bountygrid">
                <small onclick={cb_toggle_theme}>{"···"}</small>
                <nav>
                    <aside title="energy">{energy}</aside>
                    <aside title="bounties">{bounties}</aside>
                </nav>
                <canvas
                    ref={self.canvas_ref.clone()}
                    width={(u32::from(cols) * CELL_PX).to_string()}
                    height={(u32::from(rows) * CELL_PX).to_string()}
                    {onmousemove}
                    {onclick}
                />
                <button class={button_class} disabled={finished} onclick={cb_next_level}>
                    {button_label}
                </button>
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        let Some(canvas) = self.canvas_ref.cast::<HtmlCanvasElement>() else {
            return;
        };
        let Some(ctx2d) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            return;
        };
        self.paint(&ctx2d);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_mapping_floors_to_cells_and_bounds_checks() {
        let size = (12, 12);

        assert_eq!(pixel_to_cell(0, 0, size), Some((0, 0)));
        assert_eq!(pixel_to_cell(39, 39, size), Some((0, 0)));
        assert_eq!(pixel_to_cell(40, 0, size), Some((1, 0)));
        assert_eq!(pixel_to_cell(479, 479, size), Some((11, 11)));
        assert_eq!(pixel_to_cell(480, 479, size), None);
        assert_eq!(pixel_to_cell(-1, 5, size), None);
    }

    #[test]
    fn found_cover_wins_over_reveal_tint() {
        use game::{CellMark, SpecialCell};

        let revealed = cell_paint(SpecialCell::Bounty, CellMark::Revealed);
        assert_eq!(revealed.base, BOUNTY_COLOR);
        assert_eq!(revealed.label, Some("B"));
        assert_eq!(revealed.tint, Some(REVEAL_TINT));
        assert!(!revealed.cover);

        let found = cell_paint(SpecialCell::Bounty, CellMark::Found);
        assert_eq!(found.tint, None);
        assert!(found.cover);

        let hidden_energy = cell_paint(SpecialCell::Energy, CellMark::Hidden);
        assert_eq!(hidden_energy.base, ENERGY_COLOR);
        assert_eq!(hidden_energy.label, None);
        assert_eq!(hidden_energy.tint, None);
        assert!(!hidden_energy.cover);
    }

    #[test]
    fn next_level_roll_matches_the_progression_rules() {
        let config = game::GameConfig::first_level();
        let (next, layout) = roll_next_level(&config, 99);

        assert_eq!(next.bounties, 2);
        assert!((game::LEVEL_ENERGY_MIN..=game::LEVEL_ENERGY_MAX).contains(&next.energy));
        assert_eq!(layout.bounty_count(), next.bounties);
        assert_eq!(layout.energy_count(), next.energy);
    }

    #[test]
    fn click_outcomes_report_updates_through_results() {
        let ok: Result<game::ClickOutcome, game::GameError> = Ok(game::ClickOutcome::BountyFound);
        let noop: Result<game::ClickOutcome, game::GameError> = Ok(game::ClickOutcome::NoChange);
        let err: Result<game::ClickOutcome, game::GameError> = Err(game::GameError::AlreadyEnded);

        assert!(ok.has_update());
        assert!(!noop.has_update());
        assert!(!err.has_update());
    }
}
