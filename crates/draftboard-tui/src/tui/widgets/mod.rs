// TUI widget modules for each board panel.

pub mod board;
pub mod confirm;
pub mod filter_bar;
pub mod guidance;
pub mod my_team;
pub mod player_detail;
pub mod status_bar;

use ratatui::style::Color;

use draftboard_core::catalog::Rating;

/// Color for a floor/ceiling rating, red (poor) through green (excellent).
pub fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::Poor => Color::Red,
        Rating::Mediocre => Color::LightRed,
        Rating::Good => Color::Yellow,
        Rating::Great => Color::LightGreen,
        Rating::Excellent => Color::Green,
    }
}

/// Flatten a rendered test buffer into one string per row.
#[cfg(test)]
pub(crate) fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

/// Catalog with a handful of real rows for widget tests.
#[cfg(test)]
pub(crate) fn test_catalog() -> draftboard_core::catalog::Catalog {
    const CSV: &str = "\
name,team,position,overall_rank,position_rank,adp,tier,must_draft,avoid,overrated,underrated,floor,ceiling,projection
Ja'Marr Chase,CIN,WR,1,1,1.0,1,x,,,,Great,Excellent,1450 yds 12 TD
Bijan Robinson,ATL,RB,2,1,2.6,1,x,,,,Great,Excellent,
Brock Bowers,LV,TE,23,1,18.6,3,,,x,,Good,Excellent,
Joe Mixon,HOU,RB,70,26,52.6,6,,x,x,,Mediocre,Great,
Brandon Aubrey,DAL,K,103,1,105.0,8,,,,,Great,Excellent,
";
    draftboard_core::catalog::load_catalog_from_reader(CSV.as_bytes(), "widgets")
        .expect("test catalog should load")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_colors_are_distinct() {
        let colors: Vec<Color> = [
            Rating::Poor,
            Rating::Mediocre,
            Rating::Good,
            Rating::Great,
            Rating::Excellent,
        ]
        .into_iter()
        .map(rating_color)
        .collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
