//! Lectura de campos desde la terminal.

use std::fmt;
use std::io::{self, BufRead, Write};

use colored::*;

use crate::models::vehicle::{VehicleForm, VehicleStatus};

/// Valor que borra un campo opcional
pub const CLEAR_MARKER: &str = "-";

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Escribe una línea completa en la salida
    pub fn say(&mut self, text: impl fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Lee una línea recortada; `None` al llegar a fin de entrada
    pub fn line(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label.bright_yellow())?;
        self.output.flush()?;

        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(buffer.trim().to_string()))
    }

    /// Campo con valor actual: una respuesta vacía lo conserva
    pub fn field(&mut self, name: &str, current: &str) -> io::Result<Option<String>> {
        let label = if current.is_empty() {
            format!("{}: ", name)
        } else {
            format!("{} [{}]: ", name, current)
        };
        Ok(self.line(&label)?.map(|answer| {
            if answer.is_empty() {
                current.to_string()
            } else {
                answer
            }
        }))
    }

    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.line(&format!("{} (y/N): ", question))?;
        Ok(matches!(
            answer.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("y") | Some("yes")
        ))
    }

    /// Acepta el número de la opción o la etiqueta; vacío conserva el actual
    fn status(&mut self, current: VehicleStatus, options: &[VehicleStatus]) -> io::Result<Option<VehicleStatus>> {
        let listing = options
            .iter()
            .enumerate()
            .map(|(i, status)| format!("{}) {}", i + 1, status))
            .collect::<Vec<_>>()
            .join("  ");

        loop {
            let Some(answer) = self.line(&format!("Status {} [{}]: ", listing, current))? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(Some(current));
            }
            if let Some(status) = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| options.get(i))
            {
                return Ok(Some(*status));
            }
            match answer.parse::<VehicleStatus>() {
                Ok(status) => return Ok(Some(status)),
                Err(e) => self.say(format!("❌ {}", e.user_message()).bright_red())?,
            }
        }
    }

    /// Formulario completo a partir de `initial`.
    ///
    /// Un año no numérico queda vacío y lo rechaza la validación del
    /// formulario. `-` borra la ciudad. `None` si la entrada se agota.
    pub fn vehicle_form(
        &mut self,
        initial: &VehicleForm,
        options: &[VehicleStatus],
    ) -> io::Result<Option<VehicleForm>> {
        let Some(vin) = self.field("VIN", &initial.vin)? else {
            return Ok(None);
        };
        let Some(brand) = self.field("Brand", &initial.brand)? else {
            return Ok(None);
        };
        let Some(model) = self.field("Model", &initial.model)? else {
            return Ok(None);
        };

        let current_year = initial.year.map(|y| y.to_string()).unwrap_or_default();
        let Some(year) = self.field("Year", &current_year)? else {
            return Ok(None);
        };

        let Some(status) = self.status(initial.status, options)? else {
            return Ok(None);
        };

        let current_city = initial.city.clone().unwrap_or_default();
        let Some(city) = self.field("City (- to clear)", &current_city)? else {
            return Ok(None);
        };

        Ok(Some(VehicleForm {
            vin,
            brand,
            model,
            year: year.trim().parse::<i32>().ok(),
            status,
            city: if city.is_empty() || city == CLEAR_MARKER {
                None
            } else {
                Some(city)
            },
        }))
    }
}
