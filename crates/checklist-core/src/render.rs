use std::io::{
  self,
  IsTerminal,
  Write
};

use checklist_shared::TaskRow;
use chrono::Local;
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Renderer {
  color: bool
}

impl Renderer {
  pub fn new(
    cfg: &Config
  ) -> anyhow::Result<Self> {
    let color = cfg
      .get_bool("color")?
      .unwrap_or(true)
      && io::stdout().is_terminal();
    Ok(Self { color })
  }

  pub fn plain() -> Self {
    Self { color: false }
  }

  pub fn write_task_table<W: Write>(
    &self,
    mut out: W,
    rows: &[TaskRow]
  ) -> anyhow::Result<()> {
    if rows.is_empty() {
      writeln!(out, "No tasks.")?;
      return Ok(());
    }

    let headers = vec![
      "#".to_string(),
      "Done".to_string(),
      "Created".to_string(),
      "Task".to_string(),
    ];

    let body = rows
      .iter()
      .map(|row| {
        let position = self.paint(
          &(row.position + 1).to_string(),
          "33"
        );
        let done = if row.done {
          "[x]"
        } else {
          "[ ]"
        };
        let created = row
          .created_at
          .with_timezone(&Local)
          .format("%Y-%m-%d %H:%M")
          .to_string();
        let text = if row.done {
          self.paint(&row.text, "9;2")
        } else {
          row.text.clone()
        };
        vec![
          position,
          done.to_string(),
          created,
          text,
        ]
      })
      .collect();

    write_table(&mut out, headers, body)
  }

  fn paint(
    &self,
    text: &str,
    code: &str
  ) -> String {
    if !self.color {
      return text.to_string();
    }
    format!("\x1b[{code}m{text}\x1b[0m")
  }
}

fn write_table<W: Write>(
  mut writer: W,
  headers: Vec<String>,
  rows: Vec<Vec<String>>
) -> anyhow::Result<()> {
  let mut widths: Vec<usize> = headers
    .iter()
    .map(|header| header.width())
    .collect();

  for row in &rows {
    for (idx, cell) in
      row.iter().enumerate()
    {
      widths[idx] = widths[idx]
        .max(strip_ansi(cell).width());
    }
  }

  let header_line: Vec<String> = headers
    .iter()
    .zip(&widths)
    .map(|(header, width)| {
      pad(header, *width)
    })
    .collect();
  writeln!(
    writer,
    "{}",
    header_line.join(" ").trim_end()
  )?;

  let rule: Vec<String> = widths
    .iter()
    .map(|width| "-".repeat(*width))
    .collect();
  writeln!(writer, "{}", rule.join(" "))?;

  for row in rows {
    let line: Vec<String> = row
      .iter()
      .zip(&widths)
      .map(|(cell, width)| {
        pad(cell, *width)
      })
      .collect();
    writeln!(
      writer,
      "{}",
      line.join(" ").trim_end()
    )?;
  }

  Ok(())
}

fn pad(cell: &str, width: usize) -> String {
  let visible = strip_ansi(cell).width();
  format!(
    "{cell}{}",
    " ".repeat(width.saturating_sub(visible))
  )
}

fn strip_ansi(s: &str) -> String {
  let mut out =
    String::with_capacity(s.len());
  let mut escaped = false;

  for ch in s.chars() {
    if escaped {
      if ch == 'm' {
        escaped = false;
      }
      continue;
    }

    if ch == '\x1b' {
      escaped = true;
      continue;
    }

    out.push(ch);
  }

  out
}
