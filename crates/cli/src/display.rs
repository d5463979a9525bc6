//! Terminal rendering for boards, outcomes and battle tables

use std::fmt::Write as _;
use std::sync::Arc;

use console::{pad_str, style, Alignment, Color, Style};
use roster::{hall_buckets, AllocationEvent, AssignmentOutcome, ComparisonResult, UNASSIGNED_HALL};
use shared::{
    BattleRecord, BattleSummary, GuildBattleData, Player, PlayerClass, SlotPosition,
    TeamConfiguration, ViewMode, REGIMENT_CAPACITY, SLOTS_PER_SQUAD, SQUADS_PER_REGIMENT,
};

const CELL_WIDTH: usize = 16;

/// 1-based `r.s.p` label, the inverse of [`crate::board::parse_slot`]
pub fn slot_label(at: SlotPosition) -> String {
    format!("{}.{}.{}", at.regiment + 1, at.squad + 1, at.position + 1)
}

/// Nearest 256-colour palette entry for a class colour
pub fn class_style(class: PlayerClass) -> Style {
    let (r, g, b) = class.rgb();
    let cube = |c: u8| (c as u16 * 5 / 255) as u8;
    Style::new().fg(Color::Color256(16 + 36 * cube(r) + 6 * cube(g) + cube(b)))
}

fn pad(text: &str, width: usize) -> String {
    pad_str(text, width, Alignment::Left, Some("…")).into_owned()
}

/// The whole board, one block per regiment
pub fn render_board(config: &TeamConfiguration) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        style(&config.name).bold(),
        style(format!("({} players)", config.occupied_count())).dim()
    );

    for (r, regiment) in config.regiments.iter().enumerate() {
        let occupied = config.regiment_occupancy(r);
        let count = format!("({}/{})", occupied, REGIMENT_CAPACITY);
        let count = if regiment.is_full() {
            style(count).red()
        } else {
            style(count).dim()
        };
        let _ = writeln!(out, "\n【{}】 {}", style(&regiment.name).bold(), count);

        let mut header = pad("", 8);
        for s in 1..=SQUADS_PER_REGIMENT {
            header.push_str(&pad(&format!("队伍{}", s), CELL_WIDTH));
        }
        let _ = writeln!(out, "{}", style(header.trim_end()).underlined());

        for position in 0..SLOTS_PER_SQUAD {
            let mut line = pad(&format!("位置{}", position + 1), 8);
            for squad in &regiment.squads {
                let cell = match &squad.players[position] {
                    Some(player) => {
                        let text = pad(&format!("{} {}", player.name, player.combat_power), CELL_WIDTH);
                        class_style(player.class).apply_to(text).to_string()
                    }
                    None => style(pad("·", CELL_WIDTH)).dim().to_string(),
                };
                line.push_str(&cell);
            }
            let _ = writeln!(out, "{}", line.trim_end());
        }
    }
    out
}

/// One-line description of an allocator event
pub fn describe_event(event: &AllocationEvent) -> String {
    match event {
        AllocationEvent::Placed {
            at,
            player,
            displaced,
        } => match displaced {
            Some(previous) => format!(
                "Placed {} at {} (replaced {})",
                player,
                slot_label(*at),
                previous
            ),
            None => format!("Placed {} at {}", player, slot_label(*at)),
        },
        AllocationEvent::Swapped {
            from,
            to,
            moved,
            exchanged,
        } => match (moved, exchanged) {
            (Some(a), Some(b)) => format!(
                "Swapped {} ({}) with {} ({})",
                a,
                slot_label(*from),
                b,
                slot_label(*to)
            ),
            (Some(a), None) => format!("Moved {} to {}", a, slot_label(*to)),
            (None, Some(b)) => format!("Moved {} to {}", b, slot_label(*from)),
            (None, None) => "Both slots are empty; nothing moved".to_string(),
        },
        AllocationEvent::Removed { at, player } => match player {
            Some(name) => format!("Removed {} from {}", name, slot_label(*at)),
            None => format!("Slot {} was already empty", slot_label(*at)),
        },
    }
}

/// Per-hall counts of a roster, in assignment order
pub fn render_halls(players: &[Arc<Player>]) -> String {
    let mut out = String::new();
    for (hall, bucket) in hall_buckets(players) {
        let _ = writeln!(
            out,
            "  {} {}",
            pad(hall.unwrap_or(UNASSIGNED_HALL), 12),
            bucket.len()
        );
    }
    out
}

/// Summary of a bulk assignment
pub fn render_outcome(outcome: &AssignmentOutcome) -> String {
    let mut out = format!(
        "Assigned {} players across {} regiments",
        outcome.assigned,
        outcome
            .configuration
            .regiments
            .iter()
            .filter(|r| r.occupied() > 0)
            .count()
    );
    if outcome.is_partial() {
        let names: Vec<&str> = outcome.unassigned.iter().map(|p| p.name.as_str()).collect();
        let _ = write!(
            out,
            "\n{} {} players did not fit: {}",
            style("!").yellow(),
            outcome.unassigned_count(),
            names.join(", ")
        );
    }
    out
}

fn summary_row(label: &str, count: usize, summary: &BattleSummary) -> String {
    format!(
        "{}{:>6}{:>10}{:>10}{:>14}{:>14}{:>12.1}{:>14.0}",
        pad(label, 20),
        count,
        summary.total_kills,
        summary.total_assists,
        summary.total_damage,
        summary.total_healing,
        summary.avg_kills,
        summary.avg_damage,
    )
}

/// Guild (and optionally team) summary table
pub fn render_summary(guilds: &[GuildBattleData], view: ViewMode) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        style(format!(
            "{}{:>6}{:>10}{:>10}{:>14}{:>14}{:>12}{:>14}",
            pad("帮会", 20),
            "人数",
            "击败",
            "助攻",
            "总伤害",
            "治疗值",
            "平均击败",
            "平均伤害"
        ))
        .bold()
    );

    for guild in guilds {
        let _ = writeln!(
            out,
            "{}",
            summary_row(&guild.guild_name, guild.records.len(), &guild.summary)
        );
        if view == ViewMode::GuildTeam {
            for team in &guild.teams {
                let label = format!("  └ {}", team.team_leader);
                let _ = writeln!(out, "{}", summary_row(&label, team.records.len(), &team.summary));
            }
        }
    }
    out
}

/// Record table
pub fn render_records(records: &[&BattleRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        style(format!(
            "{}{}{}{}{:>8}{:>8}{:>14}{:>14}{:>10}",
            pad("帮会", 12),
            pad("玩家", 14),
            pad("职业", 8),
            pad("团长", 12),
            "击败",
            "助攻",
            "总伤害",
            "治疗值",
            "控制"
        ))
        .bold()
    );

    for record in records {
        let _ = writeln!(
            out,
            "{}{}{}{}{:>8}{:>8}{:>14}{:>14}{:>10}",
            pad(&record.guild_name, 12),
            pad(&record.player_name, 14),
            class_style(record.class).apply_to(pad(record.class.label(), 8)),
            pad(&record.regiment_leader, 12),
            record.kills,
            record.assists,
            record.total_damage(),
            record.healing,
            record.control,
        );
    }
    out
}

/// Name list diff
pub fn render_comparison(result: &ComparisonResult) -> String {
    let section = |title: &str, names: &[String]| {
        format!("{} ({}): {}", title, names.len(), names.join(", "))
    };
    [
        section("Common", &result.common),
        section("Only in first", &result.only_in_group1),
        section("Only in second", &result.only_in_group2),
    ]
    .join("\n")
}
