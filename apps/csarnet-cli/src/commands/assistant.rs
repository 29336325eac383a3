use csarnet_core::assistant::{QUICK_ACTIONS, respond};

pub fn ask(question: &str) {
    match respond(question) {
        Some(answer) => println!("{}", answer),
        None => {
            println!("Try asking:");
            for prompt in QUICK_ACTIONS {
                println!("  csarnet ask \"{}\"", prompt);
            }
        }
    }
}
