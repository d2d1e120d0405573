//! Single-page timer view

use crate::state::TimerSnapshot;
use super::responses::PageMeta;

const PLAY_ICON: &str = "&#9654;";
const PAUSE_ICON: &str = "&#10074;&#10074;";

/// Render the page for the given timer. The page keeps itself current by
/// listening to `/events` and drives the timer through the command endpoints.
pub fn render_page(timer: &TimerSnapshot) -> String {
    let page = PageMeta::from_snapshot(timer);
    let toggle_icon = if timer.running { PAUSE_ICON } else { PLAY_ICON };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<meta property="og:title" content="{og_title}">
<meta property="og:description" content="{description}">
<meta property="og:image" content="{og_url}">
<meta property="og:image:width" content="{og_width}">
<meta property="og:image:height" content="{og_height}">
<meta property="og:image:alt" content="{og_alt}">
<style>
body {{ display: flex; height: 100vh; margin: 0; align-items: center; justify-content: center; font-family: serif; }}
@media (prefers-color-scheme: dark) {{ body {{ background: #000; color: #fff; }} button {{ color: #fff; }} }}
#time-left {{ font-size: 6rem; font-weight: 300; display: flex; }}
#time-left span {{ width: 8rem; }}
#minutes {{ text-align: right; }}
#time-left .colon {{ width: auto; }}
.controls {{ display: flex; justify-content: center; gap: 1rem; margin-top: 2rem; }}
button {{ background: none; border: none; font-size: 1.25rem; cursor: pointer; width: 2rem; height: 2rem; }}
</style>
</head>
<body>
<main>
<div id="time-left"><span id="minutes">{minutes}</span><span class="colon">:</span><span id="seconds">{seconds}</span></div>
<div class="controls">
<button id="start_stop" onclick="command('start-stop')">{toggle_icon}</button>
<button id="skip" onclick="command('skip')">&#8594;</button>
<button id="reset" onclick="command('reset')">&#8635;</button>
</div>
</main>
<script>
function render(timer) {{
  document.getElementById("minutes").textContent = timer.minutes;
  document.getElementById("seconds").textContent = timer.seconds;
  document.getElementById("start_stop").innerHTML = timer.running ? "{pause}" : "{play}";
  document.title = timer.title;
}}
function command(name) {{
  fetch("/" + name, {{ method: "POST" }}).then(r => r.json()).then(body => render(body.timer));
}}
new EventSource("/events").addEventListener("timer", e => render(JSON.parse(e.data)));
</script>
</body>
</html>
"#,
        title = page.title,
        description = page.description,
        og_title = page.og_title,
        og_url = page.og_image.url,
        og_width = page.og_image.width,
        og_height = page.og_image.height,
        og_alt = page.og_image.alt,
        minutes = timer.minutes,
        seconds = timer.seconds,
        toggle_icon = toggle_icon,
        pause = PAUSE_ICON,
        play = PLAY_ICON,
    )
}
