//! Axum web server with WebSocket control for the visualizer.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

use algoviz_algorithms::dp::KnapsackProblem;
use algoviz_algorithms::structures::{heap_layout, HeapNode, StructureOp};
use algoviz_algorithms::tree::TraversalOrder;
use algoviz_algorithms::{describe, pseudocode, Algorithm, AlgorithmInfo};
use algoviz_core::{AnimationStep, NodeId};

use crate::driver::{drive, drive_traversal, CancelFlag, TokioClock};
use crate::error::{Result, VisError};
use crate::playback::{PlaybackStatus, Speed};
use crate::session::Session;
use crate::store::VisualState;

type SharedSession = Arc<RwLock<Session>>;

/// Visualization server.
pub struct VisServer {
    session: SharedSession,
}

impl VisServer {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
        }
    }

    /// Shared handle to the session behind the routes.
    pub fn session(&self) -> SharedSession {
        self.session.clone()
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/status", get(status_handler))
            .route("/api/algorithms", get(algorithms_handler))
            .route("/api/state", get(state_handler))
            .route("/api/steps", get(steps_handler))
            .route("/api/pseudocode", get(pseudocode_handler))
            .route("/api/algorithm", post(algorithm_handler))
            .route("/api/visualize", post(visualize_handler))
            .route("/api/playback/pause", post(pause_handler))
            .route("/api/playback/resume", post(resume_handler))
            .route("/api/playback/stop", post(stop_handler))
            .route("/api/playback/step", post(step_handler))
            .route("/api/playback/seek", post(seek_handler))
            .route("/api/playback/speed", post(speed_handler))
            .route("/api/array/reset", post(reset_array_handler))
            .route("/api/grid/clear", post(clear_board_handler))
            .route("/api/grid/mouse", post(mouse_handler))
            .route("/api/graph/generate", post(generate_graph_handler))
            .route("/api/strings", post(strings_handler))
            .route("/api/knapsack", post(knapsack_handler))
            .route("/api/tree/insert", post(tree_insert_handler))
            .route("/api/tree/delete", post(tree_delete_handler))
            .route("/api/tree/clear", post(tree_clear_handler))
            .route("/api/tree/traverse", post(traverse_handler))
            .route("/api/structure", post(structure_handler))
            .route("/api/heap", get(heap_layout_handler))
            .route("/api/heap/insert", post(heap_insert_handler))
            .route("/api/heap/extract", post(heap_extract_handler))
            .route("/api/heap/build", post(heap_build_handler))
            // WebSocket for control and state pulls
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.session.clone())
    }

    /// Run the server on the given address.
    pub async fn serve(self, addr: SocketAddr) -> std::result::Result<(), std::io::Error> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Visualizer running on http://{}", addr);
        axum::serve(listener, self.router()).await
    }
}

/// Everything a frontend needs to draw one frame.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub algorithm: Algorithm,
    pub playback: PlaybackStatus,
    /// Log line for the step just applied
    pub description: Option<String>,
    /// Pseudocode line for the step just applied
    pub line: Option<usize>,
    pub state: VisualState,
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        let algorithm = session.algorithm();
        let step = session.current_step();
        Self {
            algorithm,
            playback: PlaybackStatus::from(session.playback()),
            description: step.map(|s| describe(s, algorithm)),
            line: step.and_then(|s| pseudocode(algorithm).map(|p| p.line_for(s))),
            state: session.state().clone(),
        }
    }
}

/// Start the timed replay of whatever run the session just captured.
fn spawn_run(session: SharedSession, cancel: CancelFlag) {
    tokio::spawn(async move {
        let outcome = drive(session, &TokioClock, cancel).await;
        debug!("Run ended: {:?}", outcome);
    });
}

fn spawn_traversal(session: SharedSession, cancel: CancelFlag) {
    tokio::spawn(async move {
        let outcome = drive_traversal(session, &TokioClock, cancel).await;
        debug!("Traversal ended: {:?}", outcome);
    });
}

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    algorithm: Algorithm,
    playback: PlaybackStatus,
}

async fn status_handler(State(session): State<SharedSession>) -> Json<StatusResponse> {
    let session = session.read().await;
    Json(StatusResponse {
        status: "ok",
        algorithm: session.algorithm(),
        playback: PlaybackStatus::from(session.playback()),
    })
}

#[derive(Serialize)]
struct AlgorithmEntry {
    id: Algorithm,
    interactive: bool,
    #[serde(flatten)]
    info: AlgorithmInfo,
}

async fn algorithms_handler() -> Json<Vec<AlgorithmEntry>> {
    Json(
        Algorithm::ALL
            .iter()
            .map(|&id| AlgorithmEntry {
                id,
                interactive: id.is_interactive(),
                info: id.info(),
            })
            .collect(),
    )
}

async fn state_handler(State(session): State<SharedSession>) -> Json<SessionSnapshot> {
    let session = session.read().await;
    Json(SessionSnapshot::from(&*session))
}

async fn steps_handler(State(session): State<SharedSession>) -> Json<Vec<AnimationStep>> {
    let session = session.read().await;
    Json(session.playback().steps().to_vec())
}

#[derive(Serialize)]
struct PseudocodeResponse {
    algorithm: Algorithm,
    lines: &'static [&'static str],
    active: Option<usize>,
}

async fn pseudocode_handler(State(session): State<SharedSession>) -> Json<PseudocodeResponse> {
    let session = session.read().await;
    let algorithm = session.algorithm();
    let code = pseudocode(algorithm);
    Json(PseudocodeResponse {
        algorithm,
        lines: code.map(|c| c.lines).unwrap_or_default(),
        active: session
            .current_step()
            .and_then(|s| code.map(|c| c.line_for(s))),
    })
}

#[derive(Deserialize)]
struct AlgorithmRequest {
    algorithm: Algorithm,
}

async fn algorithm_handler(
    State(session): State<SharedSession>,
    Json(req): Json<AlgorithmRequest>,
) -> Json<SessionSnapshot> {
    let mut session = session.write().await;
    session.set_algorithm(req.algorithm);
    Json(SessionSnapshot::from(&*session))
}

#[derive(Debug, Serialize, Deserialize)]
struct RunResponse {
    steps: usize,
}

async fn visualize_handler(State(shared): State<SharedSession>) -> Result<Json<RunResponse>> {
    let (steps, cancel) = {
        let mut session = shared.write().await;
        (session.visualize()?, session.cancel_flag())
    };
    spawn_run(shared, cancel);
    Ok(Json(RunResponse { steps }))
}

async fn pause_handler(State(session): State<SharedSession>) -> Json<PlaybackStatus> {
    let mut session = session.write().await;
    session.pause();
    Json(PlaybackStatus::from(session.playback()))
}

async fn resume_handler(State(session): State<SharedSession>) -> Json<PlaybackStatus> {
    let mut session = session.write().await;
    session.resume();
    Json(PlaybackStatus::from(session.playback()))
}

async fn stop_handler(State(session): State<SharedSession>) -> Json<PlaybackStatus> {
    let mut session = session.write().await;
    session.stop_animation();
    Json(PlaybackStatus::from(session.playback()))
}

async fn step_handler(State(session): State<SharedSession>) -> Result<Json<PlaybackStatus>> {
    let mut session = session.write().await;
    session.step_forward()?;
    Ok(Json(PlaybackStatus::from(session.playback())))
}

#[derive(Deserialize)]
struct SeekRequest {
    position: usize,
}

async fn seek_handler(
    State(session): State<SharedSession>,
    Json(req): Json<SeekRequest>,
) -> Result<Json<PlaybackStatus>> {
    let mut session = session.write().await;
    session.seek(req.position)?;
    Ok(Json(PlaybackStatus::from(session.playback())))
}

#[derive(Deserialize)]
struct SpeedRequest {
    speed: u8,
}

async fn speed_handler(
    State(session): State<SharedSession>,
    Json(req): Json<SpeedRequest>,
) -> Json<PlaybackStatus> {
    let mut session = session.write().await;
    session.set_speed(Speed::new(req.speed));
    Json(PlaybackStatus::from(session.playback()))
}

async fn reset_array_handler(State(session): State<SharedSession>) -> Result<Json<SessionSnapshot>> {
    let mut session = session.write().await;
    if !session.reset_array() {
        return Err(VisError::AlreadyRunning);
    }
    Ok(Json(SessionSnapshot::from(&*session)))
}

async fn clear_board_handler(State(session): State<SharedSession>) -> Result<Json<SessionSnapshot>> {
    let mut session = session.write().await;
    if !session.clear_board() {
        return Err(VisError::AlreadyRunning);
    }
    Ok(Json(SessionSnapshot::from(&*session)))
}

/// Pointer events on the board, forwarded from the canvas.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum MouseEvent {
    Down { row: usize, col: usize },
    Enter { row: usize, col: usize },
    Up,
}

async fn mouse_handler(
    State(session): State<SharedSession>,
    Json(event): Json<MouseEvent>,
) -> Json<SessionSnapshot> {
    let mut session = session.write().await;
    match event {
        MouseEvent::Down { row, col } => session.mouse_down(row, col),
        MouseEvent::Enter { row, col } => session.mouse_enter(row, col),
        MouseEvent::Up => session.mouse_up(),
    }
    Json(SessionSnapshot::from(&*session))
}

async fn generate_graph_handler(
    State(session): State<SharedSession>,
) -> Result<Json<SessionSnapshot>> {
    let mut session = session.write().await;
    if !session.generate_graph() {
        return Err(VisError::AlreadyRunning);
    }
    Ok(Json(SessionSnapshot::from(&*session)))
}

#[derive(Deserialize)]
struct StringsRequest {
    first: String,
    second: String,
}

async fn strings_handler(
    State(session): State<SharedSession>,
    Json(req): Json<StringsRequest>,
) -> Result<Json<SessionSnapshot>> {
    let mut session = session.write().await;
    session.set_strings(req.first, req.second)?;
    Ok(Json(SessionSnapshot::from(&*session)))
}

async fn knapsack_handler(
    State(session): State<SharedSession>,
    Json(problem): Json<KnapsackProblem>,
) -> Result<Json<SessionSnapshot>> {
    let mut session = session.write().await;
    session.set_knapsack(problem)?;
    Ok(Json(SessionSnapshot::from(&*session)))
}

#[derive(Deserialize)]
struct ValueRequest {
    value: i64,
}

#[derive(Serialize)]
struct TreeResponse {
    node: Option<NodeId>,
    changed: bool,
    snapshot: SessionSnapshot,
}

async fn tree_insert_handler(
    State(session): State<SharedSession>,
    Json(req): Json<ValueRequest>,
) -> Result<Json<TreeResponse>> {
    let mut session = session.write().await;
    let node = session.tree_insert(req.value)?;
    Ok(Json(TreeResponse {
        node,
        changed: node.is_some(),
        snapshot: SessionSnapshot::from(&*session),
    }))
}

async fn tree_delete_handler(
    State(session): State<SharedSession>,
    Json(req): Json<ValueRequest>,
) -> Result<Json<TreeResponse>> {
    let mut session = session.write().await;
    let changed = session.tree_delete(req.value)?;
    Ok(Json(TreeResponse {
        node: None,
        changed,
        snapshot: SessionSnapshot::from(&*session),
    }))
}

async fn tree_clear_handler(State(session): State<SharedSession>) -> Json<SessionSnapshot> {
    let mut session = session.write().await;
    session.tree_clear();
    Json(SessionSnapshot::from(&*session))
}

#[derive(Deserialize)]
struct TraverseRequest {
    order: TraversalOrder,
}

async fn traverse_handler(
    State(shared): State<SharedSession>,
    Json(req): Json<TraverseRequest>,
) -> Result<Json<SessionSnapshot>> {
    let (snapshot, cancel) = {
        let mut session = shared.write().await;
        session.traverse(req.order)?;
        (SessionSnapshot::from(&*session), session.cancel_flag())
    };
    spawn_traversal(shared, cancel);
    Ok(Json(snapshot))
}

async fn structure_handler(
    State(shared): State<SharedSession>,
    Json(op): Json<StructureOp>,
) -> Result<Json<RunResponse>> {
    let (steps, cancel) = {
        let mut session = shared.write().await;
        (session.apply_structure(op)?, session.cancel_flag())
    };
    spawn_run(shared, cancel);
    Ok(Json(RunResponse { steps }))
}

async fn heap_layout_handler(State(session): State<SharedSession>) -> Json<Vec<HeapNode>> {
    let session = session.read().await;
    Json(heap_layout(&session.state().array))
}

async fn heap_insert_handler(
    State(shared): State<SharedSession>,
    Json(req): Json<ValueRequest>,
) -> Result<Json<RunResponse>> {
    let (steps, cancel) = {
        let mut session = shared.write().await;
        (session.heap_insert(req.value)?, session.cancel_flag())
    };
    spawn_run(shared, cancel);
    Ok(Json(RunResponse { steps }))
}

async fn heap_extract_handler(State(shared): State<SharedSession>) -> Result<Json<RunResponse>> {
    let (steps, cancel) = {
        let mut session = shared.write().await;
        (session.heap_extract()?, session.cancel_flag())
    };
    spawn_run(shared, cancel);
    Ok(Json(RunResponse { steps }))
}

#[derive(Deserialize)]
struct BuildRequest {
    values: Vec<i64>,
}

async fn heap_build_handler(
    State(shared): State<SharedSession>,
    Json(req): Json<BuildRequest>,
) -> Result<Json<RunResponse>> {
    let (steps, cancel) = {
        let mut session = shared.write().await;
        (session.heap_build(&req.values)?, session.cancel_flag())
    };
    spawn_run(shared, cancel);
    Ok(Json(RunResponse { steps }))
}

async fn ws_handler(ws: WebSocketUpgrade, State(session): State<SharedSession>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, session))
}

async fn handle_ws(mut socket: WebSocket, session: SharedSession) {
    // Initial frame
    let snapshot = SessionSnapshot::from(&*session.read().await);
    if let Ok(json) = serde_json::to_string(&WsResponse::State(snapshot)) {
        let _ = socket.send(Message::Text(json.into())).await;
    }

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                let response = match serde_json::from_str::<WsCommand>(&text) {
                    Ok(cmd) => handle_ws_command(&session, cmd).await,
                    Err(e) => WsResponse::Error {
                        message: e.to_string(),
                    },
                };
                if let Ok(json) = serde_json::to_string(&response) {
                    let _ = socket.send(Message::Text(json.into())).await;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
    debug!("WebSocket closed");
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    GetState,
    GetStatus,
    SelectAlgorithm { algorithm: Algorithm },
    Visualize,
    Pause,
    Resume,
    Stop,
    Step,
    Seek { position: usize },
    SetSpeed { speed: u8 },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsResponse {
    State(SessionSnapshot),
    Status(PlaybackStatus),
    Error { message: String },
}

async fn handle_ws_command(shared: &SharedSession, cmd: WsCommand) -> WsResponse {
    apply_ws_command(shared, cmd)
        .await
        .unwrap_or_else(|e| WsResponse::Error {
            message: e.to_string(),
        })
}

async fn apply_ws_command(shared: &SharedSession, cmd: WsCommand) -> Result<WsResponse> {
    let mut session = shared.write().await;
    match cmd {
        WsCommand::GetState => return Ok(WsResponse::State(SessionSnapshot::from(&*session))),
        WsCommand::GetStatus => {}
        WsCommand::SelectAlgorithm { algorithm } => {
            session.set_algorithm(algorithm);
            return Ok(WsResponse::State(SessionSnapshot::from(&*session)));
        }
        WsCommand::Visualize => {
            session.visualize()?;
            spawn_run(shared.clone(), session.cancel_flag());
        }
        WsCommand::Pause => {
            session.pause();
        }
        WsCommand::Resume => {
            session.resume();
        }
        WsCommand::Stop => {
            session.stop_animation();
        }
        WsCommand::Step => {
            session.step_forward()?;
        }
        WsCommand::Seek { position } => {
            session.seek(position)?;
        }
        WsCommand::SetSpeed { speed } => session.set_speed(Speed::new(speed)),
    }
    Ok(WsResponse::Status(PlaybackStatus::from(session.playback())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VisConfig;
    use crate::playback::PlaybackState;

    fn server(algorithm: Algorithm) -> VisServer {
        VisServer::new(Session::new(VisConfig {
            seed: Some(11),
            algorithm,
            ..VisConfig::default()
        }))
    }

    #[test]
    fn router_builds() {
        let _router = server(Algorithm::Bubble).router();
    }

    #[tokio::test]
    async fn visualize_then_stop() {
        let server = server(Algorithm::Merge);
        let Json(run) = visualize_handler(State(server.session())).await.unwrap();
        assert!(run.steps > 0);

        let err = visualize_handler(State(server.session())).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);

        let Json(status) = stop_handler(State(server.session())).await;
        assert_eq!(status.state, PlaybackState::Stopped);
        assert!(!server.session().read().await.is_playing());
    }

    #[tokio::test]
    async fn selecting_an_algorithm_loads_its_preset() {
        let server = server(Algorithm::Bubble);
        let req = AlgorithmRequest {
            algorithm: Algorithm::Sudoku,
        };
        let Json(snapshot) = algorithm_handler(State(server.session()), Json(req)).await;
        assert_eq!(snapshot.algorithm, Algorithm::Sudoku);
        assert_eq!(snapshot.state.array.len(), 81);
    }

    #[tokio::test]
    async fn tree_requests_report_changes() {
        let server = server(Algorithm::Bst);
        let insert = |value| tree_insert_handler(State(server.session()), Json(ValueRequest { value }));

        let Json(first) = insert(5).await.unwrap();
        assert!(first.changed);
        let Json(dup) = insert(5).await.unwrap();
        assert!(!dup.changed);
        assert_eq!(dup.snapshot.state.tree.map(|n| n.value), Some(5));
    }

    #[tokio::test]
    async fn knapsack_requests_are_bounded() {
        let server = server(Algorithm::Knapsack);
        let huge: KnapsackProblem = serde_json::from_str(
            r#"{"items":[{"name":"Gold","weight":1,"value":5}],"capacity":1099511627776}"#,
        )
        .unwrap();
        let err = knapsack_handler(State(server.session()), Json(huge))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNPROCESSABLE_ENTITY);

        let small: KnapsackProblem = serde_json::from_str(
            r#"{"items":[{"name":"Gold","weight":1,"value":5}],"capacity":3}"#,
        )
        .unwrap();
        let Json(snapshot) = knapsack_handler(State(server.session()), Json(small))
            .await
            .unwrap();
        assert_eq!(snapshot.state.dp_table.rows(), 2);
        assert_eq!(snapshot.state.dp_table.cols(), 4);
    }

    #[tokio::test]
    async fn ws_commands_answer_with_status() {
        let server = server(Algorithm::Bubble);
        let shared = server.session();

        let response = handle_ws_command(&shared, WsCommand::SetSpeed { speed: 250 }).await;
        let WsResponse::Status(status) = response else {
            panic!("expected status");
        };
        assert_eq!(status.speed, Speed::new(100));

        let response = handle_ws_command(&shared, WsCommand::Step).await;
        assert!(matches!(response, WsResponse::Error { .. }));
    }

    #[test]
    fn ws_commands_parse_from_json() {
        let cmd: WsCommand = serde_json::from_str(r#"{"type":"seek","position":12}"#).unwrap();
        assert!(matches!(cmd, WsCommand::Seek { position: 12 }));

        let cmd: WsCommand =
            serde_json::from_str(r#"{"type":"select_algorithm","algorithm":"GREEDY_BFS"}"#).unwrap();
        assert!(matches!(
            cmd,
            WsCommand::SelectAlgorithm {
                algorithm: Algorithm::GreedyBfs
            }
        ));
    }

    #[test]
    fn mouse_events_parse_from_json() {
        let event: MouseEvent = serde_json::from_str(r#"{"event":"down","row":3,"col":4}"#).unwrap();
        assert!(matches!(event, MouseEvent::Down { row: 3, col: 4 }));
        let event: MouseEvent = serde_json::from_str(r#"{"event":"up"}"#).unwrap();
        assert!(matches!(event, MouseEvent::Up));
    }
}
