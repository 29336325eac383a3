//! Canned help answers for common questions about the service.

/// Prompts offered as one-click questions.
pub const QUICK_ACTIONS: [&str; 4] = [
    "How to upload images?",
    "Processing time?",
    "Improve colorization quality?",
    "Supported file formats?",
];

const UPLOAD: &str = "To upload images in C-SARNet:\n\n\
1. Run `csarnet upload <file>` or `csarnet colorize <file>`\n\
2. Supported formats: PNG, JPEG, and TIFF\n\
3. Maximum file size: 50MB\n\n\
Once uploaded, the colorized result is written next to your input.";

const PROCESSING_TIME: &str = "Processing times vary based on:\n\n\
- Image size and complexity\n\
- Current server load\n\
- File format\n\n\
Typical processing times:\n\
- Small images (< 2MB): 30-60 seconds\n\
- Medium images (2-10MB): 1-3 minutes\n\
- Large images (10-50MB): 3-10 minutes\n\n\
Note: Processing time is limited to prevent server overload.";

const FORMATS: &str = "C-SARNet supports the following formats:\n\n\
Input formats:\n\
- PNG\n\
- JPEG/JPG\n\
- TIFF/TIF\n\n\
Output formats:\n\
- PNG (best for detailed images)\n\
- JPEG (smaller file size)\n\
- TIFF (highest quality, scientific use)\n\n\
All formats maintain the colorization quality from our AI model.";

const QUALITY: &str = "To get the best colorization results:\n\n\
Image preparation:\n\
- Use high-resolution source images\n\
- Ensure good contrast in your SAR data\n\
- Avoid heavily compressed files\n\n\
Best practices:\n\
- TIFF format provides best input quality\n\
- Images with clear features colorize better\n\
- Coastal and urban areas typically show excellent results";

const ACCOUNT: &str = "You can manage your account with:\n\n\
- `csarnet whoami` to view personal information\n\
- `csarnet history` to check upload history\n\
- `csarnet stats` for usage statistics\n\
- `csarnet update-profile` and `csarnet avatar` to change your details";

const TROUBLESHOOTING: &str = "If you encounter issues:\n\n\
Common solutions:\n\
- Check file format (PNG, JPEG, TIFF only)\n\
- Verify file size (max 50MB)\n\
- Ensure a stable internet connection\n\
- Run `csarnet health` to check the service\n\n\
Still having problems?\n\
- Check your upload history for processing status\n\
- Contact support if the issue persists";

const GENERAL: &str = "I'm here to help with C-SARNet! I can assist you with:\n\n\
- Uploading and processing SAR images\n\
- File format questions\n\
- Processing times and quality tips\n\
- Account and profile management\n\
- Troubleshooting common issues\n\n\
What specific question do you have about SAR image colorization?";

/// Keyword groups, checked in order; the first hit wins. A keyword matches
/// any word starting with it ("formats", "uploading").
const RULES: &[(&[&str], &str)] = &[
    (&["upload", "file"], UPLOAD),
    (&["time", "processing", "long"], PROCESSING_TIME),
    (&["format", "support"], FORMATS),
    (&["quality", "improve", "better"], QUALITY),
    (&["account", "profile"], ACCOUNT),
    (&["error", "problem", "fail"], TROUBLESHOOTING),
];

/// Answer a free-text question. Blank input gets no answer.
pub fn respond(message: &str) -> Option<&'static str> {
    let message = message.trim();
    if message.is_empty() {
        return None;
    }

    let lower = message.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let answer = RULES
        .iter()
        .find(|(keywords, _)| {
            keywords
                .iter()
                .any(|k| words.iter().any(|w| w.starts_with(k)))
        })
        .map(|(_, answer)| *answer)
        .unwrap_or(GENERAL);

    Some(answer)
}
