//! Front end de terminal
//!
//! Bucle de menú sobre `VehicleController`: tabla paginada, búsqueda,
//! orden, detalle y formularios. Cada notificación bloquea hasta Enter.

pub mod prompt;
pub mod render;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use colored::*;

use crate::controllers::vehicle_controller::{Notification, VehicleController};
use crate::models::vehicle::{Vehicle, VehicleForm};
use crate::services::vehicle_list::SortKey;
use crate::utils::errors::{AppError, AppResult};
use prompt::Prompt;

/// Comando del menú principal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Search(String),
    Sort(SortKey),
    View(usize),
    Edit(usize),
    Delete(usize),
    Add,
    Reload,
    Help,
    Quit,
    Invalid(String),
}

fn row_number(arg: &str) -> Option<usize> {
    arg.trim().parse::<usize>().ok().filter(|n| *n >= 1)
}

pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let (verb, arg) = match input.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (input, ""),
    };

    let with_row = |make: fn(usize) -> Command| match row_number(arg) {
        Some(row) => make(row),
        None => Command::Invalid(format!("'{}' needs a row number", verb)),
    };

    match verb.to_ascii_lowercase().as_str() {
        "n" | "next" => Command::Next,
        "p" | "prev" => Command::Prev,
        "s" | "search" => Command::Search(arg.to_string()),
        "o" | "sort" => match arg.parse::<SortKey>() {
            Ok(key) => Command::Sort(key),
            Err(e) => Command::Invalid(e.user_message()),
        },
        "v" | "view" => with_row(Command::View),
        "e" | "edit" => with_row(Command::Edit),
        "d" | "delete" => with_row(Command::Delete),
        "a" | "add" => Command::Add,
        "r" | "retry" | "reload" => Command::Reload,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" => Command::Quit,
        "" => Command::Help,
        other => Command::Invalid(format!("Unknown command '{}'", other)),
    }
}

pub struct Console<R, W> {
    controller: VehicleController,
    prompt: Prompt<R, W>,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(controller: VehicleController) -> Self {
        Self::new(controller, Prompt::new(io::stdin().lock(), io::stdout()))
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(controller: VehicleController, prompt: Prompt<R, W>) -> Self {
        Self { controller, prompt }
    }

    /// Todo lo que se ha mostrado al usuario
    pub fn output(&self) -> &W {
        self.prompt.output()
    }

    pub async fn run(&mut self) -> Result<()> {
        if let Err(e) = self.controller.load().await {
            if !e.is_unreachable() && !self.notify(&Notification::from(&e))? {
                return Ok(());
            }
        }

        loop {
            self.print_screen()?;

            let Some(input) = self.prompt.line("> ")? else {
                break;
            };

            let keep_going = match parse_command(&input) {
                Command::Quit => false,
                Command::Next => {
                    if !self.controller.list_mut().next_page() {
                        self.prompt.say("Already on the last page".bright_yellow())?;
                    }
                    true
                }
                Command::Prev => {
                    if !self.controller.list_mut().prev_page() {
                        self.prompt.say("Already on the first page".bright_yellow())?;
                    }
                    true
                }
                Command::Search(query) => {
                    self.controller.list_mut().set_search(query);
                    true
                }
                Command::Sort(key) => {
                    self.controller.list_mut().sort_by(key);
                    true
                }
                Command::View(row) => self.view(row).await?,
                Command::Edit(row) => match self.row_id(row) {
                    Some(id) => self.edit(&id).await?,
                    None => self.invalid_row(row)?,
                },
                Command::Delete(row) => match self.row_vehicle(row) {
                    Some(vehicle) => self.delete(&vehicle).await?,
                    None => self.invalid_row(row)?,
                },
                Command::Add => self.add().await?,
                Command::Reload => {
                    match self.controller.retry().await {
                        Ok(_) => true,
                        Err(e) if e.is_unreachable() => true,
                        Err(e) => self.notify(&Notification::from(&e))?,
                    }
                }
                Command::Help => {
                    self.prompt.say(render::render_help())?;
                    true
                }
                Command::Invalid(message) => {
                    self.prompt.say(format!("❌ {}", message).bright_red())?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        self.prompt.say("👋 Bye!".bright_green())?;
        Ok(())
    }

    fn print_screen(&mut self) -> io::Result<()> {
        let list = self.controller.list();
        let page = list.page();
        let header = render::render_header(page.total_matches);
        let mut header_lines = header.lines();

        self.prompt.say("")?;
        if let Some(title) = header_lines.next() {
            self.prompt.say(title.bright_blue().bold())?;
        }

        if let Some(message) = self.controller.connection_error() {
            self.prompt.say(format!("⚠️  {}", message).bright_red().bold())?;
            return self.prompt.say("Type 'r' to retry.".bright_yellow());
        }

        for line in header_lines {
            self.prompt.say(line)?;
        }
        if !list.search().is_empty() {
            self.prompt.say(format!("Search: {}", list.search().bright_cyan()))?;
        }
        self.prompt.say("")?;
        self.prompt.say(render::render_table(&page, list.sort()))?;
        self.prompt.say("h for help".dimmed())
    }

    fn row_vehicle(&self, row: usize) -> Option<Vehicle> {
        self.controller
            .list()
            .page()
            .rows
            .get(row - 1)
            .map(|vehicle| (*vehicle).clone())
    }

    fn row_id(&self, row: usize) -> Option<String> {
        self.row_vehicle(row).map(|vehicle| vehicle.id)
    }

    fn invalid_row(&mut self, row: usize) -> Result<bool> {
        self.prompt.say(format!("❌ No vehicle in row {}", row).bright_red())?;
        Ok(true)
    }

    /// Muestra la notificación y espera Enter; `false` si la entrada se agotó
    fn notify(&mut self, notification: &Notification) -> Result<bool> {
        let text = match notification {
            Notification::Success(msg) => format!("✅ {}", msg).bright_green(),
            Notification::Error(msg) => format!("❌ {}", msg).bright_red(),
        };
        self.prompt.say(text)?;
        Ok(self.prompt.line("Press Enter to continue ")?.is_some())
    }

    async fn view(&mut self, row: usize) -> Result<bool> {
        let Some(id) = self.row_id(row) else {
            return self.invalid_row(row);
        };

        let vehicle = match self.controller.get(&id).await {
            Ok(vehicle) => vehicle,
            Err(e) => return self.notify(&Notification::from(&e)),
        };

        self.prompt.say("")?;
        self.prompt.say(render::render_detail(&vehicle))?;
        let Some(action) = self.prompt.line("e = edit, d = delete, Enter = back: ")? else {
            return Ok(false);
        };

        match action.to_ascii_lowercase().as_str() {
            "e" => self.edit(&vehicle.id).await,
            "d" => self.delete(&vehicle).await,
            _ => Ok(true),
        }
    }

    async fn add(&mut self) -> Result<bool> {
        if self.controller.connection_error().is_some() {
            self.prompt.say("❌ Cannot add vehicles while disconnected".bright_red())?;
            return Ok(true);
        }

        self.prompt.say("➕ Add Vehicle".bright_cyan().bold())?;
        let mut form = VehicleForm::default();
        loop {
            let options = self.controller.status_options();
            let Some(entered) = self.prompt.vehicle_form(&form, &options)? else {
                return Ok(false);
            };
            let result = self.controller.create(&entered).await;
            if let Some(keep_going) = self.after_submit(result)? {
                return Ok(keep_going);
            }
            form = entered;
        }
    }

    async fn edit(&mut self, id: &str) -> Result<bool> {
        let current = match self.controller.get(id).await {
            Ok(vehicle) => vehicle,
            Err(e) => return self.notify(&Notification::from(&e)),
        };

        self.prompt.say(format!("✏️  Edit {}", current.display_name()).bright_cyan().bold())?;
        let mut form = VehicleForm::from_vehicle(&current);
        loop {
            let options = self.controller.status_options();
            let Some(entered) = self.prompt.vehicle_form(&form, &options)? else {
                return Ok(false);
            };
            let result = self.controller.update(id, &entered).await;
            if let Some(keep_going) = self.after_submit(result)? {
                return Ok(keep_going);
            }
            form = entered;
        }
    }

    /// `None` cuando el formulario debe volver a mostrarse con los datos
    /// introducidos.
    fn after_submit(&mut self, result: AppResult<Notification>) -> Result<Option<bool>> {
        match result {
            Err(e @ AppError::Validation(_)) => {
                if !self.notify(&Notification::from(&e))? {
                    return Ok(Some(false));
                }
                if self.prompt.confirm("Edit the form again?")? {
                    Ok(None)
                } else {
                    Ok(Some(true))
                }
            }
            other => self.notify(&Notification::from_result(other)).map(Some),
        }
    }

    async fn delete(&mut self, vehicle: &Vehicle) -> Result<bool> {
        let question = format!(
            "Are you sure you want to delete vehicle {}?",
            vehicle.display_name()
        );
        if !self.prompt.confirm(&question)? {
            return Ok(true);
        }
        let result = self.controller.delete(&vehicle.id).await;
        self.notify(&Notification::from_result(result))
    }
}

/// Arranca el front end sobre stdin/stdout
pub async fn run(controller: VehicleController) -> Result<()> {
    Console::stdio(controller).run().await
}
