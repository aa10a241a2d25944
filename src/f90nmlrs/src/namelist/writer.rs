// f90nmlrs/src/namelist/writer.rs

//! Formatting of a single namelist group.

use super::core::Namelist;
use crate::error::{F90nmlError, Result};
use crate::fortran_types::{FormatOptions, FortranValue};
use crate::WriteOptions;
use std::io::Write;

/// Write one `&name ... /` group.
///
/// Nested groups are written as `name%field = value` assignments and
/// arrays of groups as `name(i)%field = value`, with `i` counted from
/// `options.default_start_index`. Null elements of a group array are
/// skipped.
pub fn write_group<W: Write>(
    writer: &mut W,
    name: &str,
    group: &Namelist,
    options: &WriteOptions,
) -> Result<()> {
    let lines = group_lines(group, options)?;
    writeln!(writer, "&{}", case(name, options))?;
    for line in lines {
        writeln!(writer, "{}{}", options.indent, line)?;
    }
    writeln!(writer, "/")?;
    Ok(())
}

/// Assignment lines for every variable of `group`, without indentation.
///
/// A value list holding a derived type has no namelist spelling and is
/// an `InvalidFormat` error.
pub fn group_lines(group: &Namelist, options: &WriteOptions) -> Result<Vec<String>> {
    let mut variables: Vec<_> = group.iter().collect();
    if options.sort_variables {
        variables.sort_by_key(|(name, _)| name.to_lowercase());
    }

    let mut lines = Vec::new();
    for (name, value) in variables {
        assignment_lines(&case(name, options), value, options, &mut lines)?;
    }
    Ok(lines)
}

fn assignment_lines(
    target: &str,
    value: &FortranValue,
    options: &WriteOptions,
    lines: &mut Vec<String>,
) -> Result<()> {
    match value {
        FortranValue::Group(fields) => {
            for line in group_lines(fields, options)? {
                lines.push(format!("{}%{}", target, line));
            }
        }
        FortranValue::Array(values) if value.is_group_array() => {
            for (offset, element) in values.iter().enumerate() {
                if let FortranValue::Group(fields) = element {
                    let index = options.default_start_index as i64 + offset as i64;
                    for line in group_lines(fields, options)? {
                        lines.push(format!("{}({})%{}", target, index, line));
                    }
                }
            }
        }
        FortranValue::Array(values) => array_lines(target, values, options, lines)?,
        FortranValue::Null => lines.push(format!("{} =", target)),
        scalar => {
            let value_str = scalar.to_fortran_string_with_options(&format_options(options));
            let mut line = format!("{} = {}", target, value_str);
            if options.end_comma {
                line.push(',');
            }
            lines.push(line);
        }
    }
    Ok(())
}

fn holds_group(value: &FortranValue) -> bool {
    match value {
        FortranValue::Group(_) => true,
        FortranValue::Array(values) => values.iter().any(holds_group),
        _ => false,
    }
}

fn array_lines(
    target: &str,
    values: &[FortranValue],
    options: &WriteOptions,
    lines: &mut Vec<String>,
) -> Result<()> {
    if values.iter().any(holds_group) {
        return Err(F90nmlError::invalid_format(
            target,
            "a value list cannot mix derived types with other values",
        ));
    }
    if values.is_empty() {
        lines.push(format!("{} =", target));
        return Ok(());
    }

    let format = format_options(options);
    let mut line = format!("{} = ", target);
    let header_len = line.len();
    let budget = options.column_width.saturating_sub(options.indent.len());

    for (i, value) in values.iter().enumerate() {
        let value_str = value.to_fortran_string_with_options(&format);
        if i > 0 {
            line.push(',');
            if options.column_width > 0
                && line.len() + value_str.len() + 2 > budget
                && line.len() > header_len
            {
                lines.push(line);
                line = " ".repeat(header_len);
            } else {
                line.push(' ');
            }
        }
        line.push_str(&value_str);
    }

    if options.end_comma {
        line.push(',');
    }
    lines.push(line);
    Ok(())
}

fn format_options(options: &WriteOptions) -> FormatOptions {
    FormatOptions {
        uppercase: options.uppercase,
        float_precision: options.float_precision,
        ..Default::default()
    }
}

fn case(name: &str, options: &WriteOptions) -> String {
    if options.uppercase {
        name.to_uppercase()
    } else {
        name.to_string()
    }
}
