//! The document view widget: gutter, highlighted text and caret.

use egui::{
    text::LayoutJob, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, TextFormat, Vec2,
};
use pypad_core::syntax::Color;
use pypad_core::{resolve_styles, EditorSession, Theme, TokenStyle};

const GUTTER_PAD: f32 = 8.0;
const TEXT_PAD: f32 = 4.0;

/// What the app layer needs back from a paint pass.
pub struct ViewResponse {
    /// Screen point just below the caret, used to anchor the
    /// completion popup.
    pub caret_bottom: Pos2,
}

pub(crate) fn color32(c: Color) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

/// Merges a per-byte style map into maximal runs of equal style.
pub(crate) fn style_runs(
    styles: &[Option<TokenStyle>],
) -> Vec<(usize, usize, Option<TokenStyle>)> {
    let mut runs = Vec::new();
    let mut start = 0;
    while start < styles.len() {
        let style = styles[start];
        let mut end = start + 1;
        while end < styles.len() && styles[end] == style {
            end += 1;
        }
        runs.push((start, end, style));
        start = end;
    }
    runs
}

/// Paints the document inside a scroll area and routes clicks back to
/// the session. One galley per line; layout cost scales with document
/// size, which is fine at the file sizes this editor targets.
pub fn show(
    ui: &mut egui::Ui,
    session: &mut EditorSession,
    theme: &Theme,
    font_id: &FontId,
    ensure_cursor_visible: bool,
) -> ViewResponse {
    let (row_h, char_w) = ui.fonts(|f| (f.row_height(font_id), f.glyph_width(font_id, ' ')));
    let text = session.buffer().text();
    let styles = resolve_styles(session.spans(), text.len());
    let line_count = session.buffer().line_count();
    let gutter_w = session.gutter().width() as f32 * char_w + 2.0 * GUTTER_PAD;

    let out = egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let widest = text.split('\n').map(str::len).max().unwrap_or(0);
            let desired = Vec2::new(
                (gutter_w + TEXT_PAD + widest as f32 * char_w + 40.0).max(ui.available_width()),
                (line_count as f32 * row_h + 20.0).max(ui.available_height()),
            );
            let (response, painter) = ui.allocate_painter(desired, Sense::click());
            let origin = response.rect.min;

            painter.rect_filled(
                Rect::from_min_size(origin, Vec2::new(gutter_w, desired.y)),
                0.0,
                color32(theme.gutter_background),
            );

            let cursor = session.cursor();
            let mut caret_bottom = Pos2::new(origin.x + gutter_w + TEXT_PAD, origin.y + row_h);
            let mut line_start = 0usize;
            for (i, line) in text.split('\n').enumerate() {
                let line_no = i + 1;
                let y = origin.y + i as f32 * row_h;
                painter.text(
                    Pos2::new(origin.x + gutter_w - GUTTER_PAD, y),
                    Align2::RIGHT_TOP,
                    line_no.to_string(),
                    font_id.clone(),
                    color32(theme.gutter_foreground),
                );

                let text_x = origin.x + gutter_w + TEXT_PAD;
                if !line.is_empty() {
                    let mut job = LayoutJob::default();
                    for (s, e, style) in style_runs(&styles[line_start..line_start + line.len()]) {
                        let color = style
                            .map(|st| color32(theme.color(st)))
                            .unwrap_or_else(|| color32(theme.foreground));
                        job.append(
                            &line[s..e],
                            0.0,
                            TextFormat {
                                font_id: font_id.clone(),
                                color,
                                ..Default::default()
                            },
                        );
                    }
                    let galley = ui.fonts(|f| f.layout_job(job));
                    painter.galley(Pos2::new(text_x, y), galley, color32(theme.foreground));
                }

                if line_no == cursor.line {
                    let prefix_end = line
                        .char_indices()
                        .nth(cursor.column)
                        .map(|(b, _)| b)
                        .unwrap_or(line.len());
                    let prefix_w = if prefix_end == 0 {
                        0.0
                    } else {
                        ui.fonts(|f| {
                            f.layout_no_wrap(
                                line[..prefix_end].to_string(),
                                font_id.clone(),
                                Color32::WHITE,
                            )
                            .size()
                            .x
                        })
                    };
                    let x = text_x + prefix_w;
                    painter.vline(
                        x,
                        egui::Rangef::new(y, y + row_h),
                        Stroke::new(1.5, color32(theme.foreground)),
                    );
                    caret_bottom = Pos2::new(x, y + row_h);
                    if ensure_cursor_visible {
                        ui.scroll_to_rect(
                            Rect::from_min_max(
                                Pos2::new(x - char_w, y),
                                Pos2::new(x + char_w, y + row_h),
                            ),
                            None,
                        );
                    }
                }

                line_start += line.len() + 1;
            }

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let line = ((pos.y - origin.y) / row_h).floor().max(0.0) as usize + 1;
                    // Column mapping assumes a fixed-width font.
                    let column = ((pos.x - origin.x - gutter_w - TEXT_PAD) / char_w)
                        .round()
                        .max(0.0) as usize;
                    session.click_at(line, column);
                }
                response.request_focus();
            }

            ViewResponse { caret_bottom }
        });
    out.inner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_runs_merges_adjacent() {
        let k = Some(TokenStyle::Keyword);
        let styles = [k, k, k, None, None, Some(TokenStyle::String)];
        assert_eq!(
            style_runs(&styles),
            vec![(0, 3, k), (3, 5, None), (5, 6, Some(TokenStyle::String))]
        );
    }

    #[test]
    fn test_style_runs_empty() {
        assert!(style_runs(&[]).is_empty());
    }

    #[test]
    fn test_style_runs_single_style() {
        let c = Some(TokenStyle::Comment);
        assert_eq!(style_runs(&[c, c]), vec![(0, 2, c)]);
    }
}
