// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Help panel and status line drawn over the collage.

use crate::interaction::controller::HELP_COMMANDS;

/// Semi-transparent panel listing the interactive commands.
pub fn show_help(painter: &egui::Painter, area: egui::Rect) {
    let panel = egui::Rect::from_min_size(
        area.min + egui::vec2(50.0, 50.0),
        egui::vec2(700.0, 100.0 + 32.0 * HELP_COMMANDS.len() as f32),
    )
    .intersect(area);

    painter.rect(
        panel,
        15.0,
        egui::Color32::from_rgba_unmultiplied(0, 0, 0, 200),
        egui::Stroke::new(3.0, egui::Color32::from_rgba_unmultiplied(128, 128, 128, 200)),
    );

    let text_color = egui::Color32::from_rgba_unmultiplied(255, 255, 255, 232);
    let mut pos = panel.min + egui::vec2(20.0, 16.0);
    painter.text(
        pos,
        egui::Align2::LEFT_TOP,
        "Help",
        egui::FontId::proportional(32.0),
        text_color,
    );

    pos.y += 24.0;
    for (cmd, desc) in HELP_COMMANDS {
        pos.y += 32.0;
        let font = egui::FontId::proportional(20.0);
        painter.text(pos, egui::Align2::LEFT_TOP, *cmd, font.clone(), text_color);
        painter.text(
            pos + egui::vec2(240.0, 0.0),
            egui::Align2::LEFT_TOP,
            *desc,
            font,
            text_color,
        );
    }
}

/// One line of status text in the bottom-left corner.
pub fn show_status(painter: &egui::Painter, area: egui::Rect, message: &str) {
    let pos = area.left_bottom() + egui::vec2(8.0, -8.0);
    let galley = painter.layout_no_wrap(
        message.to_string(),
        egui::FontId::proportional(14.0),
        egui::Color32::WHITE,
    );
    let bg = egui::Rect::from_min_size(pos - egui::vec2(4.0, galley.size().y + 4.0), galley.size() + egui::vec2(8.0, 8.0));
    painter.rect_filled(bg, 4.0, egui::Color32::from_black_alpha(180));
    painter.galley(pos - egui::vec2(0.0, galley.size().y), galley, egui::Color32::WHITE);
}
