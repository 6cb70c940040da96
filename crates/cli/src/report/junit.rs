// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ginkgo v1 JUnit XML report parsing.

use std::fmt::Display;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{ReportError, TestRunResult};

#[derive(Debug, Default)]
struct Case {
    classname: String,
    name: String,
    skipped: bool,
    failed: bool,
    message: String,
    text: String,
}

impl Case {
    fn from_element(element: &BytesStart<'_>) -> Result<Self, ReportError> {
        let mut case = Case::default();
        for attr in element.attributes() {
            let attr = attr.map_err(xml_error)?;
            let value = attr.unescape_value().map_err(xml_error)?;
            match attr.key.as_ref() {
                b"classname" => case.classname = value.into_owned(),
                b"name" => case.name = value.into_owned(),
                _ => {}
            }
        }
        Ok(case)
    }

    /// Record a `<failure>`; only the first one counts.
    fn fail(&mut self, element: &BytesStart<'_>) -> Result<bool, ReportError> {
        if self.failed {
            return Ok(false);
        }
        self.failed = true;
        for attr in element.attributes() {
            let attr = attr.map_err(xml_error)?;
            if attr.key.as_ref() == b"message" {
                self.message = attr.unescape_value().map_err(xml_error)?.into_owned();
            }
        }
        Ok(true)
    }

    fn finish(self) -> TestRunResult {
        let mut result = if self.failed {
            TestRunResult::failed(self.classname, self.name)
        } else if self.skipped {
            TestRunResult::skipped(self.classname, self.name)
        } else {
            TestRunResult::passed(self.classname, self.name)
        };
        result.skipped = self.skipped;
        if self.failed {
            let output = if self.text.is_empty() {
                self.message
            } else {
                self.text
            };
            result = result.with_output(output);
        }
        result
    }
}

/// Parse a JUnit XML report into one result per `<testcase>`.
pub fn parse_junit_report(content: &str) -> Result<Vec<TestRunResult>, ReportError> {
    let mut reader = Reader::from_str(content.trim_start_matches('\u{feff}'));
    reader.trim_text(true);

    let mut results = Vec::new();
    let mut case: Option<Case> = None;
    let mut capturing = false;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => match e.name().as_ref() {
                b"testcase" => case = Some(Case::from_element(&e)?),
                b"failure" => {
                    if let Some(case) = case.as_mut() {
                        capturing = case.fail(&e)?;
                    }
                }
                b"skipped" => {
                    if let Some(case) = case.as_mut() {
                        case.skipped = true;
                    }
                }
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"testcase" => results.push(Case::from_element(&e)?.finish()),
                b"failure" => {
                    if let Some(case) = case.as_mut() {
                        case.fail(&e)?;
                    }
                }
                b"skipped" => {
                    if let Some(case) = case.as_mut() {
                        case.skipped = true;
                    }
                }
                _ => {}
            },
            Event::Text(t) if capturing => {
                if let Some(case) = case.as_mut() {
                    case.text.push_str(&t.unescape().map_err(xml_error)?);
                }
            }
            Event::CData(c) if capturing => {
                if let Some(case) = case.as_mut() {
                    case.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"failure" => capturing = false,
                b"testcase" => {
                    if let Some(done) = case.take() {
                        results.push(done.finish());
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(results)
}

fn xml_error(e: impl Display) -> ReportError {
    ReportError::Xml(e.to_string())
}

#[cfg(test)]
#[path = "junit_tests.rs"]
mod tests;
