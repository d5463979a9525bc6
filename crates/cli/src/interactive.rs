//! Interactive board session
//!
//! Edits the current configuration in place; every change is written back to
//! the store as the current configuration. Placing into a full regiment is
//! reported as a warning and leaves the board unchanged.

use std::io::{self, Write};
use std::sync::Arc;

use console::style;
use roster::assign_by_hall;
use shared::{Player, RosterError, TeamConfiguration, TOTAL_CAPACITY};
use tracing::warn;

use crate::board::{self, parse_slot};
use crate::commands::team::prompt_name;
use crate::context::Context;
use crate::display;

/// Interactive REPL over one team board
pub struct InteractiveCli {
    ctx: Context,
    board: TeamConfiguration,
    players: Vec<Arc<Player>>,
}

impl InteractiveCli {
    /// Open a session on the current configuration and stored roster
    pub fn new(ctx: Context) -> anyhow::Result<Self> {
        let board = ctx.current_or_new()?;
        let players = ctx.roster()?;
        Ok(Self {
            ctx,
            board,
            players,
        })
    }

    /// Run the interactive REPL
    pub fn run(&mut self) -> anyhow::Result<()> {
        println!("Guild Roster Interactive Mode");
        println!("Type /help for commands, /quit to exit");
        println!();

        loop {
            print!(
                "[{} {}/{}] > ",
                self.board.name,
                self.board.occupied_count(),
                TOTAL_CAPACITY
            );
            io::stdout().flush()?;

            let mut input = String::new();
            if io::stdin().read_line(&mut input)? == 0 {
                break;
            }
            let input = input.trim();

            if input.is_empty() {
                continue;
            }

            if !input.starts_with('/') {
                println!("Commands start with '/'; type /help");
                continue;
            }

            match self.handle_command(input) {
                Ok(true) => break,
                Ok(false) => continue,
                Err(e) => {
                    println!("{} {}", style("Error:").red(), e);
                    continue;
                }
            }
        }

        Ok(())
    }

    fn handle_command(&mut self, input: &str) -> anyhow::Result<bool> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");
        let args = &parts[parts.len().min(1)..];

        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Goodbye!");
                return Ok(true);
            }
            "/help" | "/h" => {
                println!("Commands:");
                println!("  /show                 - Print the board");
                println!("  /roster               - Players not on the board");
                println!("  /assign               - Fill the board hall by hall");
                println!("  /place <name> <r.s.p> - Place a roster player");
                println!("  /move <r.s.p> <r.s.p> - Move or swap two slots");
                println!("  /remove <r.s.p>       - Empty a slot");
                println!("  /new [name]           - Start an empty board");
                println!("  /save [name]          - Save the board");
                println!("  /load <id|name>       - Load a saved board");
                println!("  /list                 - List saved boards");
                println!("  /quit                 - Exit");
            }
            "/show" => print!("{}", display::render_board(&self.board)),
            "/roster" => {
                let bench = board::bench(&self.board, &self.players);
                println!("{} of {} players not on the board", bench.len(), self.players.len());
                for player in bench {
                    println!(
                        "  {} {} {}",
                        display::class_style(player.class).apply_to(&player.name),
                        player.combat_power,
                        player.hall().unwrap_or("")
                    );
                }
            }
            "/assign" => {
                if self.players.is_empty() {
                    anyhow::bail!("No roster imported yet; run `roster team import <file>`");
                }
                let outcome = assign_by_hall(&self.players, &self.board);
                println!("{}", display::render_outcome(&outcome));
                self.board = outcome.configuration;
                self.persist()?;
            }
            "/place" => {
                let [name, slot] = args else {
                    anyhow::bail!("Usage: /place <name> <r.s.p>");
                };
                let at = parse_slot(slot)?;
                match board::place_by_name(&mut self.board, &self.players, name, at) {
                    Ok(event) => {
                        println!("{}", display::describe_event(&event));
                        self.persist()?;
                    }
                    Err(e) if is_capacity_error(&e) => {
                        warn!(error = %e, "Placement refused");
                        println!("{} {}", style("Warning:").yellow(), e);
                    }
                    Err(e) => return Err(e),
                }
            }
            "/move" => {
                let [from, to] = args else {
                    anyhow::bail!("Usage: /move <r.s.p> <r.s.p>");
                };
                let event = board::move_slot(&mut self.board, parse_slot(from)?, parse_slot(to)?)?;
                println!("{}", display::describe_event(&event));
                self.persist()?;
            }
            "/remove" => {
                let [slot] = args else {
                    anyhow::bail!("Usage: /remove <r.s.p>");
                };
                let event = board::remove_slot(&mut self.board, parse_slot(slot)?)?;
                println!("{}", display::describe_event(&event));
                self.persist()?;
            }
            "/new" => {
                let name = if args.is_empty() {
                    self.ctx.config.default_config_name.clone()
                } else {
                    args.join(" ")
                };
                self.board = TeamConfiguration::new(name);
                self.persist()?;
                println!("Started '{}'", self.board.name);
            }
            "/save" => {
                let name = if args.is_empty() {
                    prompt_name(&self.board.name)?
                } else {
                    args.join(" ")
                };
                self.ctx.save_as(&mut self.board, &name)?;
                println!("✓ Saved '{}'", self.board.name);
            }
            "/load" => {
                if args.is_empty() {
                    anyhow::bail!("Usage: /load <id|name>");
                }
                self.board = self.ctx.store.resolve(&args.join(" "))?;
                self.persist()?;
                println!("✓ Loaded '{}'", self.board.name);
            }
            "/list" => {
                for config in self.ctx.store.list_all()? {
                    println!("  {}  {}  {} players", config.id, config.name, config.occupied_count());
                }
            }
            _ => {
                println!("Unknown command: {}", cmd);
            }
        }

        Ok(false)
    }

    fn persist(&mut self) -> anyhow::Result<()> {
        self.ctx.store.set_current(&self.board)?;
        Ok(())
    }
}

fn is_capacity_error(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<RosterError>(),
        Some(RosterError::CapacityExceeded(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{PlayerClass, SlotPosition};

    fn session(players: usize) -> InteractiveCli {
        let mut ctx = Context::in_memory();
        let roster: Vec<Player> = (0..players)
            .map(|i| Player::new(format!("p{}", i), 1_000 - i as u64, PlayerClass::Other))
            .collect();
        ctx.store.save_players(&roster).unwrap();
        InteractiveCli::new(ctx).unwrap()
    }

    // ============== Basic Commands ==============

    #[test]
    fn test_new_session_starts_empty() {
        let cli = session(3);
        assert_eq!(cli.board.name, "新配置");
        assert_eq!(cli.players.len(), 3);
        assert_eq!(cli.board.occupied_count(), 0);
    }

    #[test]
    fn test_handle_quit_command() {
        let mut cli = session(0);
        assert!(cli.handle_command("/quit").unwrap());
        assert!(cli.handle_command("/q").unwrap());
        assert!(!cli.handle_command("/help").unwrap());
        assert!(!cli.handle_command("/unknown").unwrap());
    }

    // ============== Board Edits ==============

    #[test]
    fn test_place_move_remove() {
        let mut cli = session(2);

        cli.handle_command("/place p1 2.3.4").unwrap();
        assert!(cli.board.get(SlotPosition::new(1, 2, 3)).unwrap().is_some());

        cli.handle_command("/move 2.3.4 1.1.1").unwrap();
        assert!(cli.board.get(SlotPosition::new(0, 0, 0)).unwrap().is_some());

        cli.handle_command("/remove 1.1.1").unwrap();
        assert_eq!(cli.board.occupied_count(), 0);
        assert_eq!(cli.ctx.current_or_new().unwrap().occupied_count(), 0);
    }

    #[test]
    fn test_bad_arguments_are_errors() {
        let mut cli = session(1);
        assert!(cli.handle_command("/place p0").is_err());
        assert!(cli.handle_command("/place p0 9.9.9").is_err());
        assert!(cli.handle_command("/move 1.1.1").is_err());
        assert!(cli.handle_command("/assign extra").is_ok());
    }

    #[test]
    fn test_full_regiment_is_a_warning() {
        let mut cli = session(31);
        cli.handle_command("/assign").unwrap();
        cli.handle_command("/remove 2.1.1").unwrap();
        assert_eq!(cli.board.regiment_occupancy(0), 30);

        let result = cli.handle_command("/place p30 1.1.1");

        assert!(matches!(result, Ok(false)));
        assert_eq!(cli.board.regiment_occupancy(0), 30);
        assert_eq!(cli.board.occupied_count(), 30);
    }

    #[test]
    fn test_assign_persists_current() {
        let mut cli = session(5);

        cli.handle_command("/assign").unwrap();

        assert_eq!(cli.board.occupied_count(), 5);
        assert_eq!(cli.ctx.current_or_new().unwrap().occupied_count(), 5);
    }

    #[test]
    fn test_assign_without_roster() {
        let mut cli = session(0);
        assert!(cli.handle_command("/assign").is_err());
    }

    // ============== Save / Load ==============

    #[test]
    fn test_save_new_load() {
        let mut cli = session(1);
        cli.handle_command("/place p0 1.1.1").unwrap();
        cli.handle_command("/save 周末 帮战").unwrap();
        assert_eq!(cli.board.name, "周末 帮战");

        cli.handle_command("/new 草稿").unwrap();
        assert_eq!(cli.board.occupied_count(), 0);

        cli.handle_command("/load 周末 帮战").unwrap();
        assert_eq!(cli.board.occupied_count(), 1);
        assert!(!cli.handle_command("/list").unwrap());
    }

    #[test]
    fn test_load_unknown_is_error() {
        let mut cli = session(0);
        assert!(cli.handle_command("/load nothing").is_err());
        assert!(cli.handle_command("/load").is_err());
    }
}
