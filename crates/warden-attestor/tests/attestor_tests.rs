// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the built-in attestors.

use std::path::Path;

use warden_attestor::{JoinTokenAttestor, UnixAttestor};
use warden_core::{
    ConfigureRequest, PluginAdapter, PluginInstance, PluginKind, Selector, WardenError,
    WorkloadAttestor,
};

fn fake_process(proc_dir: &Path, pid: u32, uid: u32, gid: u32) {
    let dir = proc_dir.join(pid.to_string());
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("status"),
        format!("Name:\tworker\nPid:\t{pid}\nUid:\t{uid}\t0\t0\t0\nGid:\t{gid}\t0\t0\t0\n"),
    )
    .unwrap();
}

async fn unix_attestor(proc_dir: &Path) -> UnixAttestor {
    let attestor = UnixAttestor::new();
    attestor
        .configure(ConfigureRequest {
            configuration: format!("proc_dir = {:?}", proc_dir.display().to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    attestor
}

#[tokio::test]
async fn unix_selectors_from_fake_proc() {
    let proc_dir = tempfile::tempdir().unwrap();
    fake_process(proc_dir.path(), 4242, 1000, 100);

    let attestor = unix_attestor(proc_dir.path()).await;
    let selectors = attestor.attest(4242).await.unwrap();
    assert_eq!(
        selectors,
        vec![
            Selector::new("unix", "uid:1000"),
            Selector::new("unix", "gid:100"),
        ]
    );
    let rendered: Vec<String> = selectors.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["unix:uid:1000", "unix:gid:100"]);
}

#[tokio::test]
async fn unix_missing_process_names_pid() {
    let proc_dir = tempfile::tempdir().unwrap();
    let attestor = unix_attestor(proc_dir.path()).await;

    let err = attestor.attest(99).await.unwrap_err();
    assert!(matches!(err, WardenError::Attestation(ref m) if m.contains("pid 99")));
}

#[tokio::test]
async fn unix_status_without_ids_is_an_error() {
    let proc_dir = tempfile::tempdir().unwrap();
    let dir = proc_dir.path().join("7");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("status"), "Name:\tghost\n").unwrap();

    let attestor = unix_attestor(proc_dir.path()).await;
    let err = attestor.attest(7).await.unwrap_err();
    assert!(err.to_string().contains("Uid"));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn unix_attests_current_process() {
    let attestor = UnixAttestor::new();
    attestor.configure(ConfigureRequest::default()).await.unwrap();

    let selectors = attestor.attest(std::process::id()).await.unwrap();
    assert_eq!(selectors.len(), 2);
    assert!(selectors[0].value.starts_with("uid:"));
    assert!(selectors[1].value.starts_with("gid:"));
}

#[tokio::test]
async fn attestors_wrap_as_typed_instances() {
    let node = PluginInstance::node_attestor(JoinTokenAttestor::new());
    let workload = PluginInstance::workload_attestor(UnixAttestor::new());
    assert_eq!(node.kind(), PluginKind::NodeAttestor);
    assert_eq!(workload.kind(), PluginKind::WorkloadAttestor);

    node.configure(ConfigureRequest {
        configuration: "token = \"t0k3n\"".into(),
        ..Default::default()
    })
    .await
    .unwrap();
    let data = node
        .as_node_attestor()
        .unwrap()
        .fetch_attestation_data()
        .await
        .unwrap();
    assert_eq!(data.payload, b"t0k3n");

    let info = workload.plugin_info().await.unwrap();
    assert_eq!(info.name, "unix");
    node.shutdown().await.unwrap();
    workload.shutdown().await.unwrap();
}
