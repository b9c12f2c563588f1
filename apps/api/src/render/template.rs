/// Print stylesheet for exported resumes. A4, serif body, tight block spacing.
pub const PRINT_STYLESHEET: &str = r#"@page { size: A4; margin: 0; }
      body {
        font-family: Cambria, Georgia, serif;
        font-size: 14px;
        line-height: 1.4;
        padding: 20px;
        -webkit-print-color-adjust: exact;
        print-color-adjust: exact;
      }
      h1, h2, h3 { margin: 10px 0; }
      p { margin: 5px 0; }"#;

/// Wraps editor markup into a standalone HTML page for the headless browser.
pub fn wrap_document(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8" />
    <style>
      {PRINT_STYLESHEET}
    </style>
  </head>
  <body>
{content}
  </body>
</html>
"#
    )
}
