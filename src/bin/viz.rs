use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints, Points};

use translunar_sim::config::presets;
use translunar_sim::sim::runner::Simulation;

fn main() -> eframe::Result {
    let app = MissionViz::new();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Trans-Lunar Mission", options, Box::new(|_| Ok(Box::new(app))))
}

struct MissionViz {
    sim: Simulation,
    /// Integration steps per rendered frame; 0 pauses the simulation.
    ticks_per_frame: u32,
    /// Index of the body used as the plot origin.
    focus: usize,
    trail: Vec<[f64; 2]>,
}

impl MissionViz {
    fn new() -> Self {
        MissionViz {
            sim: Simulation::new(presets::translunar()),
            ticks_per_frame: 400,
            focus: 3, // Earth
            trail: Vec::new(),
        }
    }
}

impl eframe::App for MissionViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sim.advance(self.ticks_per_frame);
        let snap = self.sim.snapshot();

        let origin = snap.bodies[self.focus].pos;
        if let Some(vehicle) = snap.bodies.iter().find(|b| b.name == "vehicle") {
            self.trail.push([vehicle.pos.x - origin.x, vehicle.pos.y - origin.y]);
            if self.trail.len() > 20_000 {
                self.trail.remove(0);
            }
        }

        egui::TopBottomPanel::top("hud").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("t = {:.0} s ({:.2} d)", snap.time, snap.time / 86_400.0));
                if let Some(v) = &snap.vehicle {
                    ui.separator();
                    ui.label(format!("phase: {}", v.phase));
                    ui.separator();
                    ui.label(format!("stage {}  mass {:.0} kg", v.stage, v.mass));
                    ui.separator();
                    ui.label(format!("propellant {:.0} kg", v.propellant));
                    if v.descent_achieved {
                        ui.separator();
                        ui.label("descent achieved");
                    }
                    if let Some(bt) = v.touchdown {
                        ui.separator();
                        ui.label(format!("touchdown {bt:.1} s after braking"));
                    }
                }
            });
            ui.horizontal(|ui| {
                ui.label("steps/frame");
                ui.add(
                    egui::Slider::new(&mut self.ticks_per_frame, 0..=20_000).logarithmic(true),
                );
                ui.separator();
                ui.label("focus");
                let before = self.focus;
                egui::ComboBox::from_id_salt("focus")
                    .selected_text(snap.bodies[self.focus].name.clone())
                    .show_ui(ui, |ui| {
                        for (i, b) in snap.bodies.iter().enumerate() {
                            ui.selectable_value(&mut self.focus, i, b.name.clone());
                        }
                    });
                if self.focus != before {
                    self.trail.clear();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            Plot::new("system")
                .data_aspect(1.0)
                .x_axis_label("x (m)")
                .y_axis_label("y (m)")
                .show(ui, |plot_ui| {
                    for b in &snap.bodies {
                        let p = [b.pos.x - origin.x, b.pos.y - origin.y];
                        let marker = Points::new(b.name.clone(), vec![p]).radius(4.0);
                        plot_ui.points(marker);
                    }
                    if !self.trail.is_empty() {
                        let points: PlotPoints = self.trail.iter().copied().collect();
                        plot_ui.line(Line::new("vehicle trail", points));
                    }
                });
        });

        ctx.request_repaint();
    }
}
