//! Overlay rendering: header, filter chip, notifications, purchase panel,
//! missions, transactions.

use crate::state::ActivePanel;
use crate::store::NotificationKind;
use crate::AppState;
use renderer::OverlayTextBuilder;

/// Build the screen-space overlay for this frame.
pub fn build(state: &AppState, sw: f32, sh: f32) -> OverlayTextBuilder {
    let mut tb = OverlayTextBuilder::new(sw, sh);
    let scale = 2.0;
    let line_h = 8.0 * scale + 4.0;
    let white = [1.0, 1.0, 1.0, 1.0];
    let gray = [0.7, 0.7, 0.7, 1.0];
    let dim = [0.45, 0.45, 0.5, 1.0];
    // Marketplace palette: #0A84FF accent over #1c1c1e panels.
    let accent = [0.04, 0.52, 1.0, 1.0];
    let green = [0.2, 0.85, 0.4, 1.0];
    let red = [1.0, 0.3, 0.25, 1.0];
    let amber = [1.0, 0.67, 0.0, 1.0];
    let panel_bg = [0.11, 0.11, 0.12, 0.92];
    let chip_bg = [0.0, 0.0, 0.0, 0.55];

    // ---- Header: title left, balance right ----
    tb.add_rect(0.0, 0.0, sw, 40.0, panel_bg);
    tb.add_text(12.0, 12.0, "Dogglands", scale, accent);
    let balance = format!("{} DOGG", state.store.wallet.balance);
    let bw = OverlayTextBuilder::text_width(&balance, scale);
    tb.add_text(sw - bw - 12.0, 12.0, &balance, scale, white);

    // ---- Filter chip + portfolio summary ----
    let filter_line = format!("[F] {}", state.ui.filter.label());
    tb.add_text_with_bg(12.0, 52.0, &filter_line, 1.5, white, chip_bg);
    let stats = state.store.stats();
    let summary = format!(
        "{} plots - {} owned - {} DOGG portfolio",
        stats.total_parcels, stats.owned_parcels, stats.portfolio_value
    );
    tb.add_text(12.0, 80.0, &summary, 1.0, gray);

    // ---- Notifications: newest first, top right ----
    let toast_w = 280.0;
    for (i, n) in state.store.notifications.iter().take(4).enumerate() {
        let y = 52.0 + i as f32 * 44.0;
        let x = sw - toast_w - 12.0;
        let title_color = match n.kind {
            NotificationKind::Success => green,
            NotificationKind::Error => red,
            NotificationKind::Info => accent,
            NotificationKind::Warning => amber,
        };
        tb.add_rect(x, y, toast_w, 38.0, panel_bg);
        tb.add_rect(x, y, 3.0, 38.0, title_color);
        tb.add_text(x + 10.0, y + 5.0, &n.title, 1.3, title_color);
        tb.add_text(x + 10.0, y + 22.0, &n.message, 1.0, gray);
    }

    // ---- Purchase panel (bottom sheet) ----
    if let Some(index) = state.ui.selected_parcel {
        if let Some(parcel) = state.store.parcels.get(index) {
            let pw = 340.0;
            let ph = 170.0;
            let x = (sw - pw) * 0.5;
            let y = sh - ph - 48.0;
            tb.add_rect(x, y, pw, ph, panel_bg);
            tb.add_rect(x, y, pw, 2.0, accent);

            tb.add_text(x + 14.0, y + 10.0, "Land Purchase", 1.8, white);
            let mut row = y + 38.0;
            let mut field = |tb: &mut OverlayTextBuilder, label: &str, value: &str, color| {
                tb.add_text(x + 14.0, row, label, 1.2, dim);
                let vw = OverlayTextBuilder::text_width(value, 1.2);
                tb.add_text(x + pw - vw - 14.0, row, value, 1.2, color);
                row += 18.0;
            };
            field(&mut tb, "Plot ID", &parcel.id, white);
            field(&mut tb, "Island", &parcel.island, white);
            field(&mut tb, "Type", parcel.kind.as_str(), white);
            let (status, status_color) = if parcel.owned {
                ("Owned", red)
            } else {
                ("Available", green)
            };
            field(&mut tb, "Status", status, status_color);
            field(
                &mut tb,
                "Price",
                &format!("{} DOGG", parcel.price),
                accent,
            );

            let action = if parcel.owned {
                ("Already Owned", dim)
            } else if state.store.is_purchase_pending(index) {
                ("Processing...", amber)
            } else if state.store.wallet.balance < parcel.price {
                ("Insufficient balance", red)
            } else {
                ("[Enter] Buy Now", accent)
            };
            tb.add_text(x + 14.0, y + ph - 38.0, action.0, 1.5, action.1);
            tb.add_text(x + 14.0, y + ph - 18.0, "[Esc] Close", 1.2, dim);
        }
    }

    // ---- Missions panel ----
    if state.ui.panel == ActivePanel::Missions {
        let pw = 330.0;
        let x = 12.0;
        let mut y = 110.0;
        let ph = 30.0 + state.store.missions.len() as f32 * (line_h * 2.0) + 24.0;
        tb.add_rect(x, y, pw, ph, panel_bg);
        tb.add_text(x + 12.0, y + 8.0, "Missions", 1.8, white);
        y += 34.0;
        for (i, mission) in state.store.missions.iter().enumerate() {
            let selected = i == state.ui.mission_cursor;
            let marker = if selected { ">" } else { " " };
            let title_color = if mission.claimed { dim } else { white };
            tb.add_text(
                x + 12.0,
                y,
                &format!("{} {}", marker, mission.title),
                1.4,
                title_color,
            );
            let reward = if mission.claimed {
                "CLAIMED".to_string()
            } else {
                format!("+{} DOGG", mission.reward)
            };
            let rw = OverlayTextBuilder::text_width(&reward, 1.2);
            tb.add_text(
                x + pw - rw - 12.0,
                y,
                &reward,
                1.2,
                if mission.claimed { dim } else { green },
            );
            tb.add_text(x + 24.0, y + line_h * 0.9, &mission.description, 1.0, gray);
            y += line_h * 2.0;
        }
        tb.add_text(x + 12.0, y, "[Enter] Claim   [M] Close", 1.0, dim);
    }

    // ---- Transactions panel ----
    if state.ui.panel == ActivePanel::Transactions {
        let pw = 330.0;
        let x = sw - pw - 12.0;
        let mut y = 110.0;
        let shown = state.store.transactions.iter().take(10);
        let count = shown.clone().count();
        let ph = 40.0 + (count.max(1) as f32) * line_h + 16.0;
        tb.add_rect(x, y, pw, ph, panel_bg);
        tb.add_text(x + 12.0, y + 8.0, "Recent Transactions", 1.6, white);
        y += 36.0;
        if count == 0 {
            tb.add_text(x + 12.0, y, "No transactions yet", 1.1, dim);
        }
        for tx in shown {
            tb.add_text(x + 12.0, y, &tx.description, 1.1, gray);
            let amount = format!("{:+}", tx.amount);
            let color = if tx.amount < 0 { red } else { green };
            let aw = OverlayTextBuilder::text_width(&amount, 1.1);
            tb.add_text(x + pw - aw - 12.0, y, &amount, 1.1, color);
            y += line_h;
        }
    }

    // ---- Bottom hint bar ----
    tb.add_rect(0.0, sh - 26.0, sw, 26.0, chip_bg);
    tb.add_text(
        12.0,
        sh - 20.0,
        "Drag rotate - Scroll zoom - Click parcel - [F]ilter [M]issions [T]ransactions",
        1.0,
        dim,
    );

    tb
}
