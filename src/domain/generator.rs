use super::spec::{ContainerSpecification, RunOverrides};

/// Builds the argument list that follows `<runtime> run -d`.
///
/// Emission order is fixed: name, env, volumes, ports, networks, workdir, labels, devices,
/// extra hosts, restart policy, entrypoint, image, command. Labels come from a map, so their
/// relative order is not stable between runs.
pub fn generate_run_args(
    spec: &ContainerSpecification,
    overrides: Option<&RunOverrides>,
) -> Vec<String> {
    let mut args = Vec::new();

    let name = overrides
        .and_then(|o| o.name.as_deref())
        .filter(|n| !n.is_empty())
        .unwrap_or(&spec.name);
    if !name.is_empty() {
        push_flag(&mut args, "--name", name);
    }

    for env in &spec.environment {
        push_flag(&mut args, "-e", env);
    }
    for volume in &spec.volumes {
        push_flag(&mut args, "-v", volume);
    }
    for port in &spec.ports {
        push_flag(&mut args, "-p", port);
    }
    for network in &spec.networks {
        push_flag(&mut args, "--network", network);
    }

    if !spec.working_directory.is_empty() {
        push_flag(&mut args, "-w", &spec.working_directory);
    }

    for (key, value) in &spec.labels {
        push_flag(&mut args, "-l", &format!("{key}={value}"));
    }
    for device in &spec.devices {
        push_flag(&mut args, "--device", device);
    }
    for host in &spec.extra_hosts {
        push_flag(&mut args, "--add-host", host);
    }

    if !spec.restart_policy.is_empty() {
        push_flag(&mut args, "--restart", &spec.restart_policy);
    }

    // Only the executable is kept; extra entrypoint args cannot be expressed with --entrypoint.
    if let Some(entry) = spec.entry_point.first() {
        push_flag(&mut args, "--entrypoint", entry);
    }

    args.push(spec.image.clone());
    args.extend(spec.command.iter().cloned());

    args
}

/// Same tokens as [`generate_run_args`], joined into one shell-quoted string for display.
pub fn render_run_command(
    spec: &ContainerSpecification,
    overrides: Option<&RunOverrides>,
) -> String {
    shell_words::join(generate_run_args(spec, overrides))
}

fn push_flag(args: &mut Vec<String>, flag: &str, value: &str) {
    args.push(flag.to_string());
    args.push(value.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn app_spec() -> ContainerSpecification {
        ContainerSpecification {
            name: "app".to_string(),
            image: "alpine".to_string(),
            environment: vec!["X=1".to_string()],
            volumes: vec!["/a:/b".to_string()],
            ports: vec!["80:80".to_string()],
            command: vec!["echo".to_string(), "hi".to_string()],
            ..Default::default()
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn end_to_end_scenario() {
        assert_eq!(
            generate_run_args(&app_spec(), None),
            strings(&[
                "--name", "app", "-e", "X=1", "-v", "/a:/b", "-p", "80:80", "alpine", "echo", "hi"
            ])
        );
    }

    #[test]
    fn override_name_replaces_only_name() {
        let base = generate_run_args(&app_spec(), None);
        let overridden = generate_run_args(&app_spec(), Some(&RunOverrides::named("dev")));

        assert_eq!(&overridden[..2], &strings(&["--name", "dev"])[..]);
        assert_eq!(&overridden[2..], &base[2..]);
    }

    #[test]
    fn empty_override_name_falls_back_to_spec() {
        let overrides = RunOverrides {
            name: Some(String::new()),
        };
        let args = generate_run_args(&app_spec(), Some(&overrides));
        assert_eq!(&args[..2], &strings(&["--name", "app"])[..]);
    }

    #[test]
    fn name_omitted_when_both_empty() {
        let spec = ContainerSpecification {
            image: "alpine".to_string(),
            ..Default::default()
        };
        assert_eq!(generate_run_args(&spec, None), strings(&["alpine"]));
    }

    #[test]
    fn image_is_always_emitted() {
        let args = generate_run_args(&ContainerSpecification::default(), None);
        assert_eq!(args, strings(&[""]));
    }

    #[test]
    fn entrypoint_uses_first_element_only() {
        let mut spec = app_spec();
        assert!(!generate_run_args(&spec, None).contains(&"--entrypoint".to_string()));

        spec.entry_point = strings(&["sh", "-c", "x"]);
        let args = generate_run_args(&spec, None);
        let pos = args.iter().position(|a| a == "--entrypoint").unwrap();

        assert_eq!(args[pos + 1], "sh");
        assert_eq!(args[pos + 2], "alpine");
        assert!(!args.contains(&"-c".to_string()));
        assert!(!args.contains(&"x".to_string()));
    }

    #[test]
    fn full_field_order() {
        let spec = ContainerSpecification {
            name: "svc".to_string(),
            image: "img:1".to_string(),
            environment: strings(&["A=1"]),
            volumes: strings(&["/h:/c:ro"]),
            ports: strings(&["1:2"]),
            networks: strings(&["net"]),
            command: strings(&["run"]),
            entry_point: strings(&["/entry"]),
            working_directory: "/work".to_string(),
            labels: HashMap::from([("k".to_string(), "v".to_string())]),
            devices: strings(&["/dev/a:/dev/b"]),
            extra_hosts: strings(&["h:1.2.3.4"]),
            restart_policy: "always".to_string(),
        };

        assert_eq!(
            generate_run_args(&spec, None),
            strings(&[
                "--name",
                "svc",
                "-e",
                "A=1",
                "-v",
                "/h:/c:ro",
                "-p",
                "1:2",
                "--network",
                "net",
                "-w",
                "/work",
                "-l",
                "k=v",
                "--device",
                "/dev/a:/dev/b",
                "--add-host",
                "h:1.2.3.4",
                "--restart",
                "always",
                "--entrypoint",
                "/entry",
                "img:1",
                "run",
            ])
        );
    }

    #[test]
    fn labels_emitted_once_each() {
        let mut spec = app_spec();
        spec.labels = HashMap::from([
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
            ("c".to_string(), "x y".to_string()),
        ]);

        let args = generate_run_args(&spec, None);
        let labels: HashSet<&str> = args
            .windows(2)
            .filter(|w| w[0] == "-l")
            .map(|w| w[1].as_str())
            .collect();

        assert_eq!(args.iter().filter(|a| *a == "-l").count(), 3);
        assert_eq!(labels, HashSet::from(["a=1", "b=2", "c=x y"]));
    }

    #[test]
    fn generation_is_deterministic() {
        let spec = app_spec();
        assert_eq!(
            generate_run_args(&spec, None),
            generate_run_args(&spec, None)
        );
    }

    #[test]
    fn rendered_command_quotes_values() {
        let mut spec = app_spec();
        spec.environment = strings(&["GREETING=hello world"]);

        let overrides = RunOverrides::named("dev");
        let rendered = render_run_command(&spec, Some(&overrides));

        assert!(rendered.starts_with("--name dev -e "));
        assert!(rendered.ends_with(" alpine echo hi"));
        assert!(!rendered.contains(" GREETING=hello world "));
        assert_eq!(
            shell_words::split(&rendered).unwrap(),
            generate_run_args(&spec, Some(&overrides))
        );
    }

    #[test]
    fn rendered_command_splits_back_to_tokens() {
        let mut spec = app_spec();
        spec.command = strings(&["sh", "-c", "echo $HOME && ls"]);

        let rendered = render_run_command(&spec, None);
        assert_eq!(
            shell_words::split(&rendered).unwrap(),
            generate_run_args(&spec, None)
        );
    }
}
