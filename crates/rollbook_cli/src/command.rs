//! REPL command parsing.
//!
//! Field values are given as `key=value` pairs or positionally in form
//! order (roll, name, course, marks). Values containing spaces are wrapped
//! in double quotes.

use once_cell::sync::Lazy;
use regex::Regex;
use rollbook_core::FormFields;

static FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:(?P<key>[A-Za-z_]+)=)?(?:"(?P<quoted>[^"]*)"|(?P<bare>[^\s"]+))"#)
        .expect("valid field regex")
});

const FIELD_ORDER: [Field; 4] = [Field::RollNo, Field::Name, Field::Course, Field::Marks];

/// One parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(FormFields),
    Update(FormFields),
    Delete(FormFields),
    Search(FormFields),
    ViewAll,
    Help,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    RollNo,
    Name,
    Course,
    Marks,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "roll" | "roll_no" | "rollno" => Some(Self::RollNo),
            "name" => Some(Self::Name),
            "course" => Some(Self::Course),
            "marks" => Some(Self::Marks),
            _ => None,
        }
    }

    fn slot<'a>(&self, fields: &'a mut FormFields) -> &'a mut String {
        match self {
            Self::RollNo => &mut fields.roll_no,
            Self::Name => &mut fields.name,
            Self::Course => &mut fields.course,
            Self::Marks => &mut fields.marks,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::RollNo => "roll",
            Self::Name => "name",
            Self::Course => "course",
            Self::Marks => "marks",
        }
    }
}

impl TryFrom<&str> for Command {
    type Error = String;

    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));

        let command = match verb.to_ascii_lowercase().as_str() {
            "add" => Self::Add(parse_fields(rest)?),
            "update" => Self::Update(parse_fields(rest)?),
            "delete" => Self::Delete(parse_fields(rest)?),
            "search" => Self::Search(parse_fields(rest)?),
            "list" | "view" | "all" => Self::ViewAll,
            "help" | "?" => Self::Help,
            "exit" | "quit" | ".exit" => Self::Exit,
            _ => return Err(format!("unknown command `{verb}`. Type `help` for usage.")),
        };

        let takes_fields = matches!(
            command,
            Self::Add(_) | Self::Update(_) | Self::Delete(_) | Self::Search(_)
        );
        if !takes_fields && !rest.trim().is_empty() {
            return Err(format!("`{verb}` takes no arguments."));
        }
        Ok(command)
    }
}

fn parse_fields(input: &str) -> Result<FormFields, String> {
    let mut fields = FormFields::default();
    let mut seen: Vec<Field> = Vec::new();
    let mut last_end = 0;

    for captures in FIELD_RE.captures_iter(input) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let gap = &input[last_end..whole.start()];
        if !gap.trim().is_empty() {
            return Err(format!("cannot parse `{}`", gap.trim()));
        }
        last_end = whole.end();

        let field = match captures.name("key") {
            Some(key) => Field::from_key(key.as_str())
                .ok_or_else(|| format!("unknown field `{}`", key.as_str()))?,
            None => *FIELD_ORDER
                .iter()
                .find(|field| !seen.contains(*field))
                .ok_or_else(|| format!("too many values at `{}`", whole.as_str()))?,
        };
        if seen.contains(&field) {
            return Err(format!("field `{}` given twice", field.label()));
        }
        seen.push(field);

        let value = captures
            .name("quoted")
            .or_else(|| captures.name("bare"))
            .map_or("", |value| value.as_str());
        *field.slot(&mut fields) = value.to_string();
    }

    let tail = &input[last_end..];
    if !tail.trim().is_empty() {
        return Err(format!("cannot parse `{}`", tail.trim()));
    }
    Ok(fields)
}
