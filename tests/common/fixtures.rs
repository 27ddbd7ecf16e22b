//! Reusable test content

/// `package.json` for the fixture project
pub const PACKAGE_JSON: &str = r#"{
  "name": "@acme/widgets",
  "version": "1.2.0",
  "dependencies": {
    "react": "^18.2.0",
    "date-fns": "^3.0.0"
  },
  "devDependencies": {
    "typescript": "^5.0.0"
  }
}
"#;

/// Identity every `Button.tsx` fixture builds as
pub const BUTTON_ID: &str = "acme-widgets::button::1.2.0";

/// Build output stem for `BUTTON_ID`
pub const BUTTON_SAFE: &str = "acme-widgets_button_1_2_0";

pub const BUTTON_TSX: &str = r#"'use fractal';
import React from 'react';

export default function Button({ label }: { label: string }) {
  return <button className="btn">{label}</button>;
}
"#;

pub const STATS_CARD_TSX: &str = r#"'use fractal';
import React from 'react';
import { format } from 'date-fns';

export default function StatsCard({ at }: { at: Date }) {
  return <div className="card">{format(at, 'PP')}</div>;
}
"#;

/// Rejected by the fake bundler
pub const BROKEN_TSX: &str = r#"'use fractal';
export default function Broken() {
  return <div>SYNTAX ERROR</div
}
"#;

/// Not a fractal: the directive is not the first statement
pub const LATE_DIRECTIVE_TSX: &str = r#"import React from 'react';
'use fractal';
export default function Late() { return null; }
"#;

/// Stand-in for esbuild.
///
/// Bundle mode copies the entry to `--outfile` and writes an empty source
/// map; transform mode echoes stdin. Input containing `SYNTAX ERROR` is
/// rejected in both modes, like a real parse failure.
pub const FAKE_ESBUILD: &str = r#"#!/bin/sh
mode=transform
entry=""
outfile=""
for arg in "$@"; do
  case "$arg" in
    --bundle) mode=bundle ;;
    --outfile=*) outfile="${arg#--outfile=}" ;;
    -*) ;;
    *) entry="$arg" ;;
  esac
done

if [ "$mode" = bundle ]; then
  if grep -q "SYNTAX ERROR" "$entry"; then
    echo "X [ERROR] Expected \">\" but found end of file" >&2
    exit 1
  fi
  mkdir -p "$(dirname "$outfile")"
  cat "$entry" > "$outfile"
  echo '{"version":3,"sources":[],"mappings":""}' > "$outfile.map"
  exit 0
fi

src=$(cat)
case "$src" in
  *"SYNTAX ERROR"*)
    echo "X [ERROR] Unexpected token" >&2
    exit 1
    ;;
esac
printf '%s\n' "$src"
"#;
