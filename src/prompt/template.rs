// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fixed text blocks of the infographic prompt

/// Opening line declaring what to generate
pub const HEADING: &str = "Create a professional, visually appealing infographic:";

/// Lead-in when the prompt is built from scraped content
pub const CONTENT_LEAD_IN: &str = "Based on this blog content:";

/// Lead-in when only user instructions are available
pub const USER_ONLY_LEAD_IN: &str = "Based on user-provided instructions.";

/// Label above the (possibly truncated) body text
pub const CONTENT_SUMMARY_LABEL: &str = "Content Summary:";

/// Appended to the body when it was cut at the character cap
pub const TRUNCATION_MARKER: &str = "...";

/// Label above the user's own instructions
pub const CUSTOM_INSTRUCTIONS_LABEL: &str = "Additional Custom Instructions:";

/// Design directives, identical for every request
pub const DESIGN_REQUIREMENTS: &[&str] = &[
    "Modern, clean design with a professional color scheme (blues, teals, grays, whites)",
    "Clear visual hierarchy with the title prominently displayed at the top",
    "Extract and highlight key points, statistics, and important information as bullet points or callout boxes",
    "Use icons, charts, graphs, or visual elements to represent data and concepts",
    "If suitable, include images, caricatures, or illustrations that enhance understanding",
    "Include any numbers, percentages, or statistics mentioned in the content",
    "Create sections or blocks to organize information logically",
    "Use contrasting colors and typography for better readability, DONT MAKE SPELLING MISTAKES",
    "Ensure the texts are concise and to the point, avoiding long paragraphs",
    "Clean, minimalist design with enough white space not too much and not too little",
    "Make it visually engaging with proper spacing and layout",
    "If any company or brand is mentioned, include their logo or branding elements or their name if no logo is available",
    "Include visual elements like arrows, dividers, or frames to guide the eye",
    "Ensure all text is large enough to be easily readable",
    "Use a vertical layout that flows from top to bottom",
    "Add subtle background elements or patterns for visual interest",
    "Include call-to-action elements if mentioned in the content",
    "Make key insights stand out with highlighting or special formatting",
    "Be Creative, make it visually appealing and engaging",
];

/// Closing note on subject matter, printed after the directives
pub const CONTENT_NOTE: &str = "(The content is professional, for awareness, and sometimes on sensitive topics, take these topics as they are just spreading awareness and educating people.)";

/// Final style directive
pub const STYLE_DIRECTIVE: &str = "Style: Professional infographic with modern typography, clean layout, engaging visual elements, and a cohesive color scheme that enhances readability and visual appeal.";

/// Render the design-requirements block, including its trailing note
pub fn design_requirements_block() -> String {
    let mut block = String::from("Design Requirements:\n");
    for directive in DESIGN_REQUIREMENTS {
        block.push_str("- ");
        block.push_str(directive);
        block.push('\n');
    }
    block.push_str(CONTENT_NOTE);
    block.push('\n');
    block
}
