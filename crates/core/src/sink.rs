//! Record sinks.

use std::io::{self, Write};

use tracing::trace;

use crate::error::Result;
use crate::record::{HEADER, Record};

/// Receives records one at a time, in processing order.
///
/// A record reported as written must already be durable with respect to a
/// later failure of the run.
pub trait RecordSink {
	fn write(&mut self, record: &Record) -> Result<()>;
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
	fn write(&mut self, record: &Record) -> Result<()> {
		(**self).write(record)
	}
}

/// Collects records in memory.
impl RecordSink for Vec<Record> {
	fn write(&mut self, record: &Record) -> Result<()> {
		self.push(record.clone());
		Ok(())
	}
}

/// Comma-separated sink, one line per record, flushed after every write.
#[derive(Debug)]
pub struct CsvSink<W: Write> {
	out: W,
	line: String,
}

impl<W: Write> CsvSink<W> {
	/// Wraps `out` without writing a header, for appending to an existing file.
	pub fn new(out: W) -> Self {
		Self { out, line: String::new() }
	}

	/// Wraps `out` and writes the column header immediately.
	pub fn with_header(out: W) -> Result<Self> {
		let mut sink = Self::new(out);
		sink.write_line(&HEADER)?;
		Ok(sink)
	}

	pub fn get_ref(&self) -> &W {
		&self.out
	}

	pub fn into_inner(self) -> W {
		self.out
	}

	fn write_line(&mut self, fields: &[&str]) -> io::Result<()> {
		self.line.clear();
		for (i, field) in fields.iter().enumerate() {
			if i > 0 {
				self.line.push(',');
			}
			push_field(&mut self.line, field);
		}
		self.line.push('\n');

		self.out.write_all(self.line.as_bytes())?;
		self.out.flush()
	}
}

impl<W: Write> RecordSink for CsvSink<W> {
	fn write(&mut self, record: &Record) -> Result<()> {
		self.write_line(&record.fields())?;
		trace!(target = "seace.sink", nomenclature = %record.nomenclature, "record written");
		Ok(())
	}
}

fn needs_quotes(field: &str) -> bool {
	field.contains([',', '"', '\n', '\r'])
}

fn push_field(line: &mut String, field: &str) {
	if needs_quotes(field) {
		line.push('"');
		line.push_str(&field.replace('"', "\"\""));
		line.push('"');
	} else {
		line.push_str(field);
	}
}
