use std::fs;
use tracing::{info, warn};

/// Check access to the input devices the observer wants to read.
///
/// Missing access is not fatal: the service still runs, input observation
/// just degrades to a no-op. Returns whether observation is possible.
pub fn check_input_access() -> bool {
    check_not_root();

    let input_dir = "/dev/input";

    if !std::path::Path::new(input_dir).exists() {
        warn!("{} does not exist, input observation disabled", input_dir);
        return false;
    }

    match fs::read_dir(input_dir) {
        Ok(_) => {
            info!("Access to {} confirmed", input_dir);
            true
        }
        Err(e) => {
            warn!(
                "No access to {}: {}. Add the user to the 'input' group to enable touch observation",
                input_dir, e
            );
            false
        }
    }
}

fn check_not_root() {
    match std::env::var("USER") {
        Ok(user) if user == "root" => {
            warn!("Running as root; prefer adding a regular user to the 'input' group");
            warn!("  sudo usermod -a -G input $USER");
            warn!("  (then log in again)");
        }
        Ok(user) => {
            info!("Running as user: {}", user);
        }
        Err(_) => {
            warn!("Could not determine the current user");
        }
    }
}

/// Commands for setting up device access, shown in docs and help output.
#[allow(dead_code)]
pub fn get_setup_commands() -> Vec<String> {
    vec![
        "# Add the user to the input group:".to_string(),
        "sudo usermod -a -G input $USER".to_string(),
        "".to_string(),
        "# Log in again afterwards".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_commands() {
        let commands = get_setup_commands();
        assert!(!commands.is_empty());
        assert!(commands.iter().any(|cmd| cmd.contains("usermod")));
    }
}
