/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

//! Assembly of the generated header and source text.

use std::num::NonZeroUsize;

use crate::resource::ImageResource;

/// Final text of one module, as written to disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedModule {
    pub module_name: String,
    pub header_text: String,
    pub source_text: String,
    pub resource_count: usize,
}

/// Header and source bodies, grown one resource at a time.
#[derive(Debug)]
pub struct ModuleOutput {
    module_name: String,
    header_body: String,
    source_body: String,
    bytes_per_line: NonZeroUsize,
    resource_count: usize,
}

impl ModuleOutput {
    pub fn new(module_name: &str, bytes_per_line: NonZeroUsize) -> Self {
        ModuleOutput {
            module_name: module_name.to_string(),
            header_body: String::new(),
            source_body: String::new(),
            bytes_per_line,
            resource_count: 0,
        }
    }

    pub fn push(&mut self, res: &ImageResource) {
        let image = res.image_symbol();
        let width = res.width_symbol();
        let height = res.height_symbol();

        self.header_body += &format!("extern const unsigned char {image}[];\n");
        self.header_body += &format!("extern const unsigned int {width};\n");
        self.header_body += &format!("extern const unsigned int {height};\n\n");

        self.source_body += &format!("const unsigned char {image}[] = {{\n");
        self.source_body += &byte_lines(res.bitmap.data(), self.bytes_per_line.get());
        self.source_body += "};\n";
        self.source_body += &format!("const unsigned int {width} = {};\n", res.width());
        self.source_body += &format!("const unsigned int {height} = {};\n\n", res.height());

        self.resource_count += 1;
    }

    pub fn finish(self) -> GeneratedModule {
        let guard = format!("{}_H", self.module_name.to_ascii_uppercase());

        let header = format!(
            "#ifndef {guard}\n#define {guard}\n\n{}#endif  // {guard}\n",
            self.header_body
        );
        let source = format!("#include \"{}.h\"\n\n{}", self.module_name, self.source_body);

        GeneratedModule {
            module_name: self.module_name,
            header_text: header.trim().to_string(),
            source_text: source.trim().to_string(),
            resource_count: self.resource_count,
        }
    }
}

fn byte_lines(data: &[u8], per_line: usize) -> String {
    let mut out = String::with_capacity(data.len() * 6);
    for chunk in data.chunks(per_line) {
        out.push_str("    ");
        let line: Vec<String> = chunk.iter().map(|b| format!("0x{b:02x}")).collect();
        out.push_str(&line.join(", "));
        out.push_str(",\n");
    }
    out
}

/// Module names end up in file names, an include guard and an `#include`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
