use common::games::snake::{Direction, Frame, SubmissionOutcome};
use eframe::egui;

use crate::state::{BOOTSTRAP_FAILED_MESSAGE, GamePhase, SharedState, ViewState};

const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x1a, 0x1a, 0x2e);
const GRID_LINE: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 25, 0, 25);
const HEAD: egui::Color32 = egui::Color32::from_rgb(0x00, 0xff, 0x00);
const TAIL: egui::Color32 = egui::Color32::from_rgb(0x00, 0x80, 0x00);
const FOOD: egui::Color32 = egui::Color32::from_rgb(0xff, 0x00, 0x00);

pub struct SnakeApp {
    shared_state: SharedState,
}

impl SnakeApp {
    pub fn new(shared_state: SharedState) -> Self {
        Self { shared_state }
    }

    fn handle_input(&self, ctx: &egui::Context, view: &ViewState) {
        let Some(session) = self.shared_state.session() else {
            return;
        };

        ctx.input(|i| {
            let direction = if i.key_pressed(egui::Key::ArrowUp) {
                Some(Direction::Up)
            } else if i.key_pressed(egui::Key::ArrowDown) {
                Some(Direction::Down)
            } else if i.key_pressed(egui::Key::ArrowLeft) {
                Some(Direction::Left)
            } else if i.key_pressed(egui::Key::ArrowRight) {
                Some(Direction::Right)
            } else {
                None
            };
            if let Some(direction) = direction {
                session.request(direction);
            }

            match view.phase {
                GamePhase::Playing if i.key_pressed(egui::Key::P) => {
                    if view.paused {
                        session.resume();
                    } else {
                        session.pause();
                    }
                }
                GamePhase::GameOver { .. } if i.key_pressed(egui::Key::R) || i.key_pressed(egui::Key::Space) => {
                    session.restart();
                }
                _ => {}
            }
        });
    }

    fn render_board(&self, ui: &mut egui::Ui, frame: &Frame) {
        let available = ui.available_size();
        let scale = (available.x / frame.board_width as f32)
            .min(available.y / frame.board_height as f32)
            .max(0.1);
        let size = egui::vec2(frame.board_width as f32 * scale, frame.board_height as f32 * scale);

        ui.vertical_centered(|ui| {
            let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
            let rect = response.rect;
            painter.rect_filled(rect, 0.0, BACKGROUND);

            let block = frame.block as f32 * scale;
            let stroke = egui::Stroke::new(1.0, GRID_LINE);
            let mut x = rect.min.x;
            while x <= rect.max.x {
                painter.line_segment([egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)], stroke);
                x += block;
            }
            let mut y = rect.min.y;
            while y <= rect.max.y {
                painter.line_segment([egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)], stroke);
                y += block;
            }

            let to_screen = |cx: i32, cy: i32| egui::pos2(rect.min.x + cx as f32 * scale, rect.min.y + cy as f32 * scale);

            let segments = frame.snake.len().max(1);
            for (i, cell) in frame.snake.iter().enumerate() {
                let t = i as f32 / segments as f32;
                let color = lerp_color(HEAD, TAIL, t);
                let min = to_screen(cell.x, cell.y) + egui::vec2(scale, scale);
                let side = (frame.block as f32 - 2.0).max(1.0) * scale;
                painter.rect_filled(egui::Rect::from_min_size(min, egui::vec2(side, side)), 2.0 * scale, color);
            }

            let half = frame.block as f32 / 2.0;
            let center = to_screen(frame.food.x, frame.food.y) + egui::vec2(half * scale, half * scale);
            painter.circle_filled(center, (half - 2.0).max(1.0) * scale, FOOD);
        });
    }

    fn render_game_over(&self, ui: &mut egui::Ui, final_score: u32, submission: Option<SubmissionOutcome>) {
        ui.vertical_centered(|ui| {
            ui.heading(egui::RichText::new("Game Over").color(egui::Color32::RED).size(32.0));
            ui.add_space(10.0);
            ui.label(format!("Final Score: {}", final_score));

            match submission {
                None => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Saving score...");
                    });
                }
                Some(SubmissionOutcome::Ok) => {
                    ui.label(egui::RichText::new("Score saved").color(egui::Color32::GRAY));
                }
                Some(SubmissionOutcome::Failed) => {
                    ui.label(
                        egui::RichText::new("Failed to save score. Please try again.")
                            .color(egui::Color32::RED),
                    );
                }
            }

            ui.add_space(10.0);
            if ui.button("Play Again (R)").clicked()
                && let Some(session) = self.shared_state.session()
            {
                session.restart();
            }
        });
    }
}

fn lerp_color(from: egui::Color32, to: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    egui::Color32::from_rgb(channel(from.r(), to.r()), channel(from.g(), to.g()), channel(from.b(), to.b()))
}

impl eframe::App for SnakeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.shared_state.has_context() {
            self.shared_state.set_context(ctx.clone());
        }

        if ctx.input(|i| i.viewport().close_requested())
            && let Some(session) = self.shared_state.session()
        {
            session.stop();
        }

        let view = self.shared_state.snapshot();
        self.handle_input(ctx, &view);

        egui::TopBottomPanel::top("score").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("Score: {}", view.score));
                if view.paused {
                    ui.label(egui::RichText::new("Paused (P to resume)").color(egui::Color32::YELLOW));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match &view.phase {
            GamePhase::BootstrapFailed => {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new(BOOTSTRAP_FAILED_MESSAGE).color(egui::Color32::RED).size(20.0));
                });
            }
            GamePhase::Loading => {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
            }
            GamePhase::Playing => {
                if let Some(frame) = &view.frame {
                    self.render_board(ui, frame);
                }
            }
            GamePhase::GameOver {
                final_score,
                submission,
                ..
            } => {
                self.render_game_over(ui, *final_score, *submission);
                ui.add_space(10.0);
                if let Some(frame) = &view.frame {
                    self.render_board(ui, frame);
                }
            }
        });
    }
}
