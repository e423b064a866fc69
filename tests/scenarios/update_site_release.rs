//! Scenario: publishing a P2 update site release.
//!
//! The build deploys the site archive at its flat layout path, then uploads
//! the unpacked repository directory next to it. A second release replaces
//! files in place.

use crate::common::TestEnv;

fn write_release(env: &TestEnv, version: &str) {
    env.write_project_file(
        &format!("target/updates-{}.zip", version),
        &format!("archive {}", version),
    );
    env.write_project_file(
        "target/repository/content.xml",
        &format!("<repository version='{}'/>", version),
    );
    env.write_project_file("target/repository/plugins/core.jar", version);

    let config = format!(
        r#"[upload]
path = "target/repository"
target_path = "site/"
chmod = false

[repository]
id = "updates"
url = "{}"

[artifact]
group_id = "eu.example"
artifact_id = "updates"
version = "{}"
extension = "zip"
file = "target/updates-{}.zip"

[deploy]
layout = "p2"
"#,
        env.repository_url("releases"),
        version,
        version
    );
    env.write_project_file("uploadfiles.toml", &config);
}

#[test]
fn scenario_deploy_then_upload_two_releases() {
    let env = TestEnv::new();

    for version in ["1.0.0", "1.1.0"] {
        write_release(&env, version);

        let deploy = env.run(&["deploy"]);
        assert!(deploy.success, "deploy failed:\n{}", deploy.combined_output());

        let upload = env.run(&["upload"]);
        assert!(upload.success, "upload failed:\n{}", upload.combined_output());

        assert_eq!(
            std::fs::read_to_string(
                env.repository_path(&format!("releases/updates-{}.zip", version))
            )
            .unwrap(),
            format!("archive {}", version)
        );
        assert_eq!(
            std::fs::read_to_string(env.repository_path("releases/site/repository/plugins/core.jar"))
                .unwrap(),
            version
        );
    }

    assert!(env.repository_path("releases/updates-1.0.0.zip").is_file());
    assert!(env
        .repository_path("releases/site/repository/content.xml")
        .is_file());
}
