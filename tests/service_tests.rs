#![cfg(feature = "std")]

mod common;

use std::sync::Arc;

use broadside::{
    ChannelNotifier, DeploymentError, FireOutcome, FireRequest, GameError, InMemoryMatchRepository,
    MatchApi, MatchEvent, MatchService, MatchState, NoopNotifier, ShipDeployment,
};
use common::{deployments, ALICE, BOB};
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;

fn service() -> (
    MatchService<InMemoryMatchRepository, ChannelNotifier>,
    UnboundedReceiver<MatchEvent>,
) {
    let (notifier, events) = ChannelNotifier::channel();
    (
        MatchService::new(Arc::new(InMemoryMatchRepository::new()), notifier),
        events,
    )
}

fn drain(events: &mut UnboundedReceiver<MatchEvent>) -> Vec<MatchEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

#[test]
fn start_stores_match_and_only_computer_matches_notify() {
    let (service, mut events) = service();
    let human = service.start(ALICE, false);
    assert_eq!(human.state, MatchState::Created);
    assert_eq!(human.id.len(), 16);
    assert!(drain(&mut events).is_empty());

    let computer = service.start(ALICE, true);
    assert_ne!(human.id, computer.id);
    assert_eq!(service.repository().len(), 2);
    assert_eq!(
        drain(&mut events),
        vec![MatchEvent::MatchCreated {
            match_id: computer.id.clone()
        }]
    );
}

#[test]
fn full_two_player_game_through_the_service() {
    let (service, mut events) = service();
    let summary = service.start(ALICE, false);
    service.join(&summary.id, BOB).unwrap();
    service.deploy_fleet(&summary.id, ALICE, &deployments()).unwrap();
    service.deploy_fleet(&summary.id, BOB, &deployments()).unwrap();
    assert_eq!(
        service.status(&summary.id).unwrap().state,
        MatchState::InProgress
    );

    let ship_cells = common::ship_cells();
    let water = common::water_cells();
    let mut last = None;
    for (i, cell) in ship_cells.iter().enumerate() {
        last = Some(
            service
                .fire(&summary.id, &FireRequest::new(ALICE, cell.encode()))
                .unwrap(),
        );
        if i + 1 < ship_cells.len() {
            service
                .fire(&summary.id, &FireRequest::new(BOB, water[i].encode()))
                .unwrap();
        }
    }
    let last = last.unwrap();
    assert_eq!(last.outcome, FireOutcome::Sunk);
    assert_eq!(last.ship_type_sunk.as_deref(), Some("Destroyer"));
    assert!(last.game_won);

    let status = service.status(&summary.id).unwrap();
    assert_eq!(status.state, MatchState::Finished);
    assert_eq!(status.winner.as_deref(), Some(ALICE));
    assert_eq!(
        drain(&mut events),
        vec![MatchEvent::MatchFinished {
            match_id: summary.id.clone(),
            winner: ALICE.into(),
        }]
    );
}

#[test]
fn human_shots_in_computer_match_notify_the_opponent() {
    let (service, mut events) = service();
    let summary = service.start(ALICE, true);
    service.join(&summary.id, "computer").unwrap();
    service.deploy_fleet(&summary.id, ALICE, &deployments()).unwrap();
    service
        .deploy_fleet(&summary.id, "computer", &deployments())
        .unwrap();
    drain(&mut events);

    service
        .fire(&summary.id, &FireRequest::new(ALICE, "B1"))
        .unwrap();
    assert_eq!(
        drain(&mut events),
        vec![MatchEvent::FireOccurred {
            match_id: summary.id.clone()
        }]
    );

    service
        .fire(&summary.id, &FireRequest::new("computer", "B1"))
        .unwrap();
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[test]
fn refused_fire_publishes_nothing() {
    let (service, mut events) = service();
    let summary = service.start(ALICE, true);
    drain(&mut events);
    let err = service
        .fire(&summary.id, &FireRequest::new(ALICE, "A1"))
        .unwrap_err();
    assert_eq!(err, GameError::MatchNotStarted);
    assert!(drain(&mut events).is_empty());
}

#[test]
fn malformed_labels_are_refused() {
    let (service, _events) = service();
    let summary = service.start(ALICE, false);
    service.join(&summary.id, BOB).unwrap();

    let mut ships = deployments();
    ships[4] = ShipDeployment::new("Destroyer", ["A1", "A"]);
    let err = service.deploy_fleet(&summary.id, ALICE, &ships).unwrap_err();
    assert!(matches!(
        err,
        GameError::Deployment(DeploymentError::InvalidCoordinate { .. })
    ));

    service.deploy_fleet(&summary.id, ALICE, &deployments()).unwrap();
    service.deploy_fleet(&summary.id, BOB, &deployments()).unwrap();
    let err = service
        .fire(&summary.id, &FireRequest::new(ALICE, "Z99"))
        .unwrap_err();
    assert!(matches!(err, GameError::InvalidCoordinate(_)));
}

#[test]
fn unknown_match_is_reported() {
    let (service, _events) = service();
    assert_eq!(
        service.status("missing").unwrap_err(),
        GameError::MatchNotFound("missing".into())
    );
    assert_eq!(
        service.join("missing", BOB).unwrap_err(),
        GameError::MatchNotFound("missing".into())
    );
}

#[tokio::test]
async fn api_errors_downcast_to_game_error() {
    let service = MatchService::new(Arc::new(InMemoryMatchRepository::new()), NoopNotifier);
    let summary = MatchApi::start(&service, ALICE, false).await.unwrap();
    let err = MatchApi::join(&service, &summary.id, ALICE).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GameError>(),
        Some(GameError::MatchJoin(_))
    ));
}
