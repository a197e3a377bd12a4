use crate::http::Response;
use colored::*;

pub enum ResponseFormat {
    Compact,
    Verbose,
}

pub struct ResponseFormatter {
    format: ResponseFormat,
    color: bool,
}

impl ResponseFormatter {
    pub fn new(format: ResponseFormat) -> Self {
        Self {
            format,
            color: true,
        }
    }

    pub fn without_color(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn format(&self, response: &Response) -> String {
        let mut output = vec![self.status_line(response), self.timing_line(response)];

        match self.format {
            ResponseFormat::Compact => {
                let body = &response.body;
                if !body.is_empty() && body.len() < 200 {
                    output.push(response.display_body());
                } else if !body.is_empty() {
                    output.push(format!("Body: {} bytes", body.len()));
                }
            }
            ResponseFormat::Verbose => {
                if !response.content_type.is_empty() {
                    output.push(self.label(&format!("Content-Type: {}", response.content_type)));
                }
                if !response.body.is_empty() {
                    output.push(String::new());
                    output.push(self.label("Body:"));
                    output.push(response.display_body());
                }
            }
        }

        output.join("\n")
    }

    fn status_line(&self, response: &Response) -> String {
        let status_line = format!(
            "HTTP {} {}",
            response.status.code(),
            response.status.reason_phrase()
        );
        if !self.color {
            return status_line;
        }

        let colored_status_line = if response.is_success() {
            status_line.green()
        } else if response.is_client_error() {
            status_line.yellow()
        } else {
            status_line.red()
        };
        colored_status_line.bold().to_string()
    }

    fn timing_line(&self, response: &Response) -> String {
        let timing = format!("Time: {}ms", response.duration.as_millis());
        if self.color {
            timing.cyan().to_string()
        } else {
            timing
        }
    }

    fn label(&self, text: &str) -> String {
        if self.color {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }
}
